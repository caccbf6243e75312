use std::sync::Arc;

use crate::profile::application::ports::incoming::use_cases::{
    CreateProfileUseCase, GetProfileUseCase, UpdateProfileUseCase,
};

#[derive(Clone)]
pub struct ProfileUseCases {
    pub create: Arc<dyn CreateProfileUseCase + Send + Sync>,
    pub get: Arc<dyn GetProfileUseCase + Send + Sync>,
    pub update: Arc<dyn UpdateProfileUseCase + Send + Sync>,
}
