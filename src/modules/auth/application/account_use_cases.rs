use std::sync::Arc;

use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::use_cases::{
    activate_account::IActivateAccountUseCase, login_user::ILoginUserUseCase,
    logout_user::ILogoutUseCase, request_password_reset::IRequestPasswordResetUseCase,
    request_reactivation::IRequestReactivationUseCase, reset_password::IResetPasswordUseCase,
};

#[derive(Clone)]
pub struct AccountUseCases {
    pub register: Arc<UserRegistrationOrchestrator>,
    pub activate: Arc<dyn IActivateAccountUseCase + Send + Sync>,
    pub request_reactivation: Arc<dyn IRequestReactivationUseCase + Send + Sync>,
    pub login: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub logout: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub request_password_reset: Arc<dyn IRequestPasswordResetUseCase + Send + Sync>,
    pub reset_password: Arc<dyn IResetPasswordUseCase + Send + Sync>,
}
