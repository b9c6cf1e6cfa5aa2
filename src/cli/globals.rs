use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub gateway_url: String,
    pub gateway_token: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(gateway_url: String) -> Self {
        Self {
            gateway_url,
            gateway_token: SecretString::default(),
        }
    }

    pub fn set_token(&mut self, token: SecretString) {
        self.gateway_token = token;
    }
}
