#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tsheet::libs::config::{Config, ServerConfig};

    /// Test context to ensure a clean environment for each config test.
    /// It sets up a temporary directory to act as the user's home/appdata
    /// directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        api_url: String,
        auth_token: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            // Mock the home/appdata directory for cross-platform compatibility.
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                api_url: "https://ops.example.com/api".to_string(),
                auth_token: "token123".to_string(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.server.is_none());
        assert!(config.server().is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        // When no config file exists, read() should return the default config.
        let config = Config::read().unwrap();
        assert!(config.server.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                api_url: ctx.api_url.clone(),
                auth_token: ctx.auth_token.clone(),
            }),
        };
        config.save().unwrap();

        let read_config = Config::read().unwrap();
        let server_config = read_config.server().unwrap();
        assert_eq!(server_config.api_url, ctx.api_url);
        assert_eq!(server_config.auth_token, ctx.auth_token);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_server_has_init_hint(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        let error = config.server().unwrap_err();
        assert!(error.to_string().contains("tsheet init"));
    }
}
