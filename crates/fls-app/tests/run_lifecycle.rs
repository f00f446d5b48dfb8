//! Run controller lifecycle against a scripted simulation service.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

use fls_app::{
    AppError, HealthResponse, ParameterModel, RunController, RunFailure, RunSimulationRequest,
    RunSimulationResponse, RunStatus, Session, SimulationService, ThroughputPoint,
};

const WAIT: Duration = Duration::from_secs(5);

/// Replies from a fixed script and records every request it receives.
struct ScriptedService {
    replies: Mutex<VecDeque<Result<RunSimulationResponse, RunFailure>>>,
    requests: Mutex<Vec<RunSimulationRequest>>,
    gate: Option<Mutex<Receiver<()>>>,
}

impl ScriptedService {
    fn new(replies: Vec<Result<RunSimulationResponse, RunFailure>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Each request blocks until the returned sender releases it.
    fn gated(replies: Vec<Result<RunSimulationResponse, RunFailure>>) -> (Self, Sender<()>) {
        let (release, gate) = channel();
        let mut service = Self::new(replies);
        service.gate = Some(Mutex::new(gate));
        (service, release)
    }

    fn requests(&self) -> Vec<RunSimulationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SimulationService for ScriptedService {
    fn run_simulation(
        &self,
        request: &RunSimulationRequest,
    ) -> Result<RunSimulationResponse, RunFailure> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            let _ = gate.lock().unwrap().recv();
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RunFailure::Transport("no scripted reply".to_string())))
    }

    fn health(&self) -> Result<HealthResponse, RunFailure> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
        })
    }
}

#[test]
fn default_config_success_populates_results() {
    let service = ScriptedService::new(vec![Ok(RunSimulationResponse::success(&[
        (0.0, 0.0),
        (1.0, 12.5),
    ]))]);
    let mut controller = RunController::new(service);
    let params = ParameterModel::new();

    controller.start(&params).unwrap();
    assert_eq!(controller.wait(WAIT), &RunStatus::Succeeded);

    assert_eq!(
        controller.results().series(),
        &[
            ThroughputPoint::new(0.0, 0.0),
            ThroughputPoint::new(1.0, 12.5)
        ]
    );
    assert_eq!(
        controller.service().requests(),
        vec![RunSimulationRequest::from(&params.snapshot())]
    );
}

#[test]
fn long_series_is_kept_in_arrival_order() {
    let points: Vec<(f64, f64)> = (0..100).map(|i| (i as f64 * 0.1, (i % 7) as f64)).collect();
    let service = ScriptedService::new(vec![Ok(RunSimulationResponse::success(&points))]);
    let mut controller = RunController::new(service);

    controller.start(&ParameterModel::new()).unwrap();
    assert_eq!(controller.wait(WAIT), &RunStatus::Succeeded);

    let series = controller.results().series();
    assert_eq!(series.len(), points.len());
    for (stored, (t, mbps)) in series.iter().zip(&points) {
        assert_eq!(stored.time_s, *t);
        assert_eq!(stored.throughput_mbps, *mbps);
    }
}

#[test]
fn second_start_while_running_is_rejected() {
    let (service, release) = ScriptedService::gated(vec![
        Ok(RunSimulationResponse::success(&[(0.0, 1.0)])),
        Ok(RunSimulationResponse::success(&[(0.0, 2.0)])),
    ]);
    let mut controller = RunController::new(service);
    let params = ParameterModel::new();

    controller.start(&params).unwrap();
    assert!(matches!(
        controller.start(&params),
        Err(AppError::AlreadyRunning)
    ));
    assert_eq!(controller.status(), &RunStatus::Running);

    release.send(()).unwrap();
    assert_eq!(controller.wait(WAIT), &RunStatus::Succeeded);
    assert_eq!(controller.service().requests().len(), 1);
    assert_eq!(controller.results().series()[0].throughput_mbps, 1.0);
}

#[test]
fn service_failure_keeps_previous_results() {
    let service = ScriptedService::new(vec![
        Ok(RunSimulationResponse::success(&[(0.0, 3.0), (1.0, 4.0)])),
        Ok(RunSimulationResponse::failure("ns-3 exited with code 1")),
    ]);
    let mut controller = RunController::new(service);
    let params = ParameterModel::new();

    controller.start(&params).unwrap();
    assert_eq!(controller.wait(WAIT), &RunStatus::Succeeded);
    let before = controller.results().current().cloned();

    controller.start(&params).unwrap();
    assert_eq!(
        controller.wait(WAIT),
        &RunStatus::Failed(RunFailure::Service("ns-3 exited with code 1".to_string()))
    );
    assert_eq!(controller.results().current().cloned(), before);
}

#[test]
fn transport_failure_is_distinct_and_recoverable() {
    let service = ScriptedService::new(vec![
        Err(RunFailure::Transport("connection refused".to_string())),
        Ok(RunSimulationResponse::success(&[(0.0, 5.0)])),
    ]);
    let mut controller = RunController::new(service);
    let params = ParameterModel::new();

    controller.start(&params).unwrap();
    let status = controller.wait(WAIT).clone();
    let failure = status.failure().expect("run should fail");
    assert!(failure.is_transport());
    assert!(controller.results().current().is_none());

    controller.start(&params).unwrap();
    assert_eq!(controller.wait(WAIT), &RunStatus::Succeeded);
    assert_eq!(controller.results().series().len(), 1);
}

#[test]
fn success_without_results_is_a_transport_failure() {
    let malformed = RunSimulationResponse {
        status: "success".to_string(),
        results: None,
        message: None,
    };
    let mut controller = RunController::new(ScriptedService::new(vec![Ok(malformed)]));

    controller.start(&ParameterModel::new()).unwrap();
    let status = controller.wait(WAIT).clone();
    assert!(status.failure().is_some_and(RunFailure::is_transport));
}

#[test]
fn edits_during_run_do_not_change_submitted_snapshot() {
    let (service, release) =
        ScriptedService::gated(vec![Ok(RunSimulationResponse::success(&[]))]);
    let mut session = Session::new(service);

    session.run().unwrap();
    session.params_mut().set_node_count(30).unwrap();
    session.params_mut().set_frequency(2.4).unwrap();

    release.send(()).unwrap();
    assert_eq!(
        session.controller_mut().wait(WAIT),
        &RunStatus::Succeeded
    );
    let requests = session.controller().service().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].node_count, 10);
    assert_eq!(requests[0].frequency, 5.0);
    assert_eq!(session.params().snapshot().node_count, 30);
    assert!(session.results().has_result());
    assert!(session.results().series().is_empty());
}

#[test]
fn deadline_expiry_fails_run_and_drops_late_reply() {
    let (service, release) =
        ScriptedService::gated(vec![Ok(RunSimulationResponse::success(&[(0.0, 1.0)]))]);
    let mut controller = RunController::new(service).with_deadline(Duration::from_millis(50));

    controller.start(&ParameterModel::new()).unwrap();
    let status = controller.wait(WAIT).clone();
    match status {
        RunStatus::Failed(RunFailure::Transport(message)) => {
            assert!(message.contains("deadline"), "unexpected message: {message}")
        }
        other => panic!("expected deadline failure, got {other:?}"),
    }

    release.send(()).unwrap();
    std::thread::sleep(Duration::from_millis(100));
    assert!(matches!(controller.poll(), RunStatus::Failed(_)));
    assert!(controller.results().current().is_none());
}

#[test]
fn cancel_returns_to_idle_and_allows_new_run() {
    let (service, release) = ScriptedService::gated(vec![
        Ok(RunSimulationResponse::success(&[(0.0, 1.0)])),
        Ok(RunSimulationResponse::success(&[(0.0, 2.0)])),
    ]);
    let mut session = Session::new(service);

    session.run().unwrap();
    assert!(session.controller_mut().cancel());
    assert_eq!(session.status(), &RunStatus::Idle);

    session.run().unwrap();
    release.send(()).unwrap();
    release.send(()).unwrap();
    assert_eq!(
        session.controller_mut().wait(WAIT),
        &RunStatus::Succeeded
    );
    assert_eq!(session.results().series().len(), 1);
}
