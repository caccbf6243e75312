/// Source of opaque token values for activation and password reset links.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}
