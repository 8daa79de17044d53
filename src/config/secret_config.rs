/// Validation rule for one secret loaded from the environment
#[derive(Debug, Clone)]
pub struct SecretConfig {
    /// Environment variable holding the secret
    pub env_var: &'static str,
    /// Minimum length in bytes
    pub min_length: usize,
}

impl SecretConfig {
    pub const fn new(env_var: &'static str) -> Self {
        Self {
            env_var,
            min_length: 0,
        }
    }

    pub const fn min_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self
    }
}
