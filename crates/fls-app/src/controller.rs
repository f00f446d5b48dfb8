//! Run lifecycle: at most one run in flight, outcomes applied on poll.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError, channel};
use std::thread;
use std::time::{Duration, Instant};

use fls_core::RunTicket;
use fls_params::ParameterModel;
use fls_results::{ResultsStore, SimulationResult, compute_config_id};
use tracing::{debug, info, warn};

use crate::client::SimulationService;
use crate::error::{AppError, AppResult, RunFailure};
use crate::wire::{RunSimulationRequest, RunSimulationResponse, ServiceOutcome};

/// Lifecycle state of the session's run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed(RunFailure),
}

impl RunStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running)
    }

    pub fn failure(&self) -> Option<&RunFailure> {
        match self {
            RunStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Idle => "Idle",
            RunStatus::Running => "Running",
            RunStatus::Succeeded => "Succeeded",
            RunStatus::Failed(_) => "Failed",
        }
    }

    /// Outcome of a run that has left `Running`.
    ///
    /// `Idle` and `Running` mean the caller stopped waiting too early or the
    /// run was cancelled.
    pub fn settled(&self) -> AppResult<()> {
        match self {
            RunStatus::Succeeded => Ok(()),
            RunStatus::Failed(failure) => Err(AppError::Run(failure.clone())),
            other => Err(AppError::UnexpectedRunState(other.label())),
        }
    }
}

/// Posted by a worker thread when its request finishes.
struct Completion {
    ticket: RunTicket,
    outcome: Result<RunSimulationResponse, RunFailure>,
}

struct InFlight {
    ticket: RunTicket,
    config_id: String,
    started: Instant,
}

/// Owns the run state machine and the results store.
///
/// `start` hands the request to a worker thread and returns immediately.
/// Outcomes only change state inside `poll`/`wait`, on the owner's thread,
/// so parameter edits and state transitions never interleave. Completions
/// for a ticket that is no longer in flight (cancelled or past its deadline)
/// are dropped.
pub struct RunController<S> {
    service: Arc<S>,
    status: RunStatus,
    results: ResultsStore,
    in_flight: Option<InFlight>,
    next_ticket: RunTicket,
    deadline: Option<Duration>,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,
}

impl<S: SimulationService + 'static> RunController<S> {
    pub fn new(service: S) -> Self {
        Self::with_shared_service(Arc::new(service))
    }

    pub fn with_shared_service(service: Arc<S>) -> Self {
        let (completions_tx, completions_rx) = channel();
        Self {
            service,
            status: RunStatus::Idle,
            results: ResultsStore::new(),
            in_flight: None,
            next_ticket: RunTicket::first(),
            deadline: None,
            completions_tx,
            completions_rx,
        }
    }

    /// Fail a run that stays in flight longer than `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    pub fn results(&self) -> &ResultsStore {
        &self.results
    }

    pub fn current_ticket(&self) -> Option<RunTicket> {
        self.in_flight.as_ref().map(|f| f.ticket)
    }

    /// Wall time the current run has been in flight.
    pub fn elapsed(&self) -> Option<Duration> {
        self.in_flight.as_ref().map(|f| f.started.elapsed())
    }

    /// Submit the current parameters.
    ///
    /// Fails with [`AppError::AlreadyRunning`] while a run is in flight, in
    /// which case nothing is sent. On success the outcome is observed
    /// through [`Self::status`] after polling.
    pub fn start(&mut self, params: &ParameterModel) -> AppResult<RunTicket> {
        if self.status.is_running() {
            warn!("rejecting run submission: a run is already in flight");
            return Err(AppError::AlreadyRunning);
        }

        let snapshot = params.snapshot();
        let config_id = compute_config_id(&snapshot)?;
        let request = RunSimulationRequest::from(&snapshot);
        let ticket = self.next_ticket;

        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        thread::Builder::new()
            .name(format!("fls-{}", ticket))
            .spawn(move || {
                let outcome = service.run_simulation(&request);
                // The controller may be gone by now; nobody is left to tell.
                let _ = tx.send(Completion { ticket, outcome });
            })?;

        info!(
            %ticket,
            phy = %snapshot.phy_type,
            nodes = snapshot.node_count,
            sim_time_s = snapshot.simulation_time_s,
            "simulation run started"
        );

        self.next_ticket = ticket.next();
        self.in_flight = Some(InFlight {
            ticket,
            config_id,
            started: Instant::now(),
        });
        self.status = RunStatus::Running;
        Ok(ticket)
    }

    /// Apply any completions that have arrived. Never blocks.
    pub fn poll(&mut self) -> &RunStatus {
        loop {
            match self.completions_rx.try_recv() {
                Ok(completion) => self.apply(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.check_deadline();
        &self.status
    }

    /// Block until the current run leaves `Running` or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> &RunStatus {
        let give_up = Instant::now() + timeout;
        self.poll();

        while self.status.is_running() {
            let now = Instant::now();
            if now >= give_up {
                break;
            }
            let mut slice = give_up - now;
            if let Some(remaining) = self.deadline_remaining() {
                slice = slice.min(remaining);
            }
            match self.completions_rx.recv_timeout(slice) {
                Ok(completion) => self.apply(completion),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            self.check_deadline();
        }

        &self.status
    }

    /// Abandon the in-flight run, if any. Its response will be discarded.
    ///
    /// The status returns to `Idle`; held results are untouched.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                info!(ticket = %in_flight.ticket, "simulation run abandoned");
                self.status = RunStatus::Idle;
                true
            }
            None => false,
        }
    }

    fn deadline_remaining(&self) -> Option<Duration> {
        let deadline = self.deadline?;
        let in_flight = self.in_flight.as_ref()?;
        Some(deadline.saturating_sub(in_flight.started.elapsed()))
    }

    fn check_deadline(&mut self) {
        let (Some(deadline), Some(in_flight)) = (self.deadline, self.in_flight.as_ref()) else {
            return;
        };
        if in_flight.started.elapsed() < deadline {
            return;
        }

        let ticket = in_flight.ticket;
        self.in_flight = None;
        warn!(%ticket, deadline_s = deadline.as_secs_f64(), "simulation run exceeded deadline");
        self.status = RunStatus::Failed(RunFailure::Transport(format!(
            "run exceeded deadline of {}s",
            deadline.as_secs_f64()
        )));
    }

    fn apply(&mut self, completion: Completion) {
        let Some(in_flight) = self
            .in_flight
            .take_if(|f| f.ticket == completion.ticket)
        else {
            debug!(ticket = %completion.ticket, "discarding stale completion");
            return;
        };
        let elapsed_s = in_flight.started.elapsed().as_secs_f64();

        match completion
            .outcome
            .and_then(RunSimulationResponse::into_outcome)
        {
            Ok(ServiceOutcome::Success(series)) => {
                let result = SimulationResult::new(series, in_flight.config_id);
                if !result.is_time_ordered() {
                    warn!(ticket = %in_flight.ticket, "service returned samples out of time order");
                }
                info!(
                    ticket = %in_flight.ticket,
                    points = result.series.len(),
                    elapsed_s,
                    "simulation run succeeded"
                );
                self.results.replace(result);
                self.status = RunStatus::Succeeded;
            }
            Ok(ServiceOutcome::Failure(message)) => {
                warn!(ticket = %in_flight.ticket, %message, elapsed_s, "simulation service reported failure");
                self.status = RunStatus::Failed(RunFailure::Service(message));
            }
            Err(failure) => {
                warn!(ticket = %in_flight.ticket, error = %failure, elapsed_s, "simulation run failed");
                self.status = RunStatus::Failed(failure);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::HealthResponse;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every request with the node count as throughput, but only
    /// after the test releases it.
    struct GatedService {
        gate: Mutex<Receiver<()>>,
        calls: AtomicUsize,
    }

    impl SimulationService for GatedService {
        fn run_simulation(
            &self,
            request: &RunSimulationRequest,
        ) -> Result<RunSimulationResponse, RunFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().map_err(|e| RunFailure::Transport(e.to_string()))?;
            let _ = gate.recv();
            Ok(RunSimulationResponse::success(&[(
                0.0,
                request.node_count as f64,
            )]))
        }

        fn health(&self) -> Result<HealthResponse, RunFailure> {
            Ok(HealthResponse {
                status: "healthy".to_string(),
            })
        }
    }

    fn gated() -> (RunController<GatedService>, Sender<()>) {
        let (release, gate) = channel();
        let controller = RunController::new(GatedService {
            gate: Mutex::new(gate),
            calls: AtomicUsize::new(0),
        });
        (controller, release)
    }

    #[test]
    fn stale_completion_after_cancel_is_discarded() {
        let (mut controller, release) = gated();
        let params = ParameterModel::new();

        let first = controller.start(&params).unwrap();
        assert!(controller.cancel());
        assert_eq!(controller.status(), &RunStatus::Idle);

        // Deliver a completion for the abandoned ticket directly.
        controller
            .completions_tx
            .send(Completion {
                ticket: first,
                outcome: Ok(RunSimulationResponse::success(&[(0.0, 99.0)])),
            })
            .unwrap();
        assert_eq!(controller.poll(), &RunStatus::Idle);
        assert!(controller.results().current().is_none());

        drop(release);
    }

    #[test]
    fn stale_completion_does_not_touch_newer_run() {
        let (mut controller, release) = gated();
        let mut params = ParameterModel::new();

        let first = controller.start(&params).unwrap();
        controller.cancel();
        params.set_node_count(20).unwrap();
        let second = controller.start(&params).unwrap();
        assert_ne!(first, second);

        controller
            .completions_tx
            .send(Completion {
                ticket: first,
                outcome: Ok(RunSimulationResponse::success(&[(0.0, 99.0)])),
            })
            .unwrap();
        assert_eq!(controller.poll(), &RunStatus::Running);
        assert_eq!(controller.current_ticket(), Some(second));

        release.send(()).unwrap();
        release.send(()).unwrap();
        let status = controller.wait(Duration::from_secs(5)).clone();
        assert_eq!(status, RunStatus::Succeeded);
        // Whichever worker answered first, only the second run's answer counts.
        let series = controller.results().series();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].throughput_mbps, 20.0);
    }

    #[test]
    fn cancel_without_run_is_noop() {
        let (mut controller, _release) = gated();
        assert!(!controller.cancel());
        assert_eq!(controller.status(), &RunStatus::Idle);
    }

    #[test]
    fn status_labels() {
        assert_eq!(RunStatus::default().label(), "Idle");
        let failed = RunStatus::Failed(RunFailure::Service("boom".to_string()));
        assert_eq!(failed.label(), "Failed");
        assert_eq!(failed.failure().map(|f| f.message()), Some("boom"));
    }

    #[test]
    fn settled_maps_terminal_states() {
        assert!(RunStatus::Succeeded.settled().is_ok());

        let failure = RunFailure::Transport("connection refused".to_string());
        match RunStatus::Failed(failure.clone()).settled() {
            Err(AppError::Run(f)) => assert_eq!(f, failure),
            other => panic!("expected run failure, got {other:?}"),
        }

        assert!(matches!(
            RunStatus::Running.settled(),
            Err(AppError::UnexpectedRunState("Running"))
        ));
        assert!(matches!(
            RunStatus::Idle.settled(),
            Err(AppError::UnexpectedRunState("Idle"))
        ));
    }
}
