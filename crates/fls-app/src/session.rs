//! One user session: the editable parameters plus the run controller.

use fls_core::RunTicket;
use fls_params::ParameterModel;
use fls_results::ResultsStore;

use crate::client::{HttpSimulationService, SimulationService};
use crate::controller::{RunController, RunStatus};
use crate::error::AppResult;
use crate::settings::ClientSettings;

/// Exactly one parameter model and one run status per session.
pub struct Session<S> {
    params: ParameterModel,
    controller: RunController<S>,
}

impl<S: SimulationService + 'static> Session<S> {
    pub fn new(service: S) -> Self {
        Self::with_parts(ParameterModel::new(), RunController::new(service))
    }

    pub fn with_parts(params: ParameterModel, controller: RunController<S>) -> Self {
        Self { params, controller }
    }

    pub fn params(&self) -> &ParameterModel {
        &self.params
    }

    /// Edits are allowed at any time, including while a run is in flight.
    pub fn params_mut(&mut self) -> &mut ParameterModel {
        &mut self.params
    }

    pub fn controller(&self) -> &RunController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RunController<S> {
        &mut self.controller
    }

    /// Submit the session's current parameters.
    pub fn run(&mut self) -> AppResult<RunTicket> {
        self.controller.start(&self.params)
    }

    pub fn poll(&mut self) -> &RunStatus {
        self.controller.poll()
    }

    pub fn status(&self) -> &RunStatus {
        self.controller.status()
    }

    pub fn results(&self) -> &ResultsStore {
        self.controller.results()
    }
}

impl Session<HttpSimulationService> {
    /// Session backed by the HTTP service described in `settings`.
    pub fn connect(settings: &ClientSettings) -> AppResult<Self> {
        let service = HttpSimulationService::new(settings)?;
        let mut controller = RunController::new(service);
        if let Some(deadline) = settings.run_deadline() {
            controller = controller.with_deadline(deadline);
        }
        Ok(Self::with_parts(ParameterModel::new(), controller))
    }
}
