use sudovisor_application::AdmissionService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Validator applied to access request writes.
    pub admission_service: AdmissionService,
    /// Shared secret required on admission calls, when configured.
    pub shared_secret: Option<String>,
}
