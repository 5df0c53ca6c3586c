use clap::{ArgAction, Parser};
use policy_sidecar_types::{PolicyDefaults, SidecarConfig, WebSearchMode};

#[derive(Parser, Debug)]
#[command(
    name = "policy-sidecar",
    about = "Policy Sidecar - policy-enforcing proxy for an LLM gateway",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(long, env = "POLICY_SIDECAR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "POLICY_SIDECAR_PORT", default_value = "8000")]
    pub port: u16,

    #[arg(long, env = "LITELLM_BASE_URL", default_value = "http://litellm:4000")]
    pub backend_url: String,

    /// Bearer token for /v1/*; empty disables authentication
    #[arg(long, env = "POLICY_API_TOKEN", default_value = "", hide_env_values = true)]
    pub api_token: String,

    #[arg(
        long,
        env = "POLICY_STRIP_THINKING_DEFAULT",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub strip_thinking_default: bool,

    #[arg(
        long,
        env = "POLICY_DISABLE_THINKING_DEFAULT",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub disable_thinking_default: bool,

    #[arg(long, env = "POLICY_ENABLE_WEB_SEARCH_DEFAULT", default_value = "off")]
    pub web_search_default: WebSearchMode,

    #[arg(
        long,
        env = "POLICY_ENABLE_CITATIONS_DEFAULT",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub citations_default: bool,

    #[arg(
        long,
        env = "POLICY_INCLUDE_RESULTS_IN_STREAM_DEFAULT",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub include_results_default: bool,

    #[arg(
        long,
        env = "POLICY_INCLUDE_VENICE_SYSTEM_PROMPT_DEFAULT",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub include_system_prompt_default: bool,

    #[arg(
        long,
        env = "POLICY_ALLOW_HEADER_OVERRIDES",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub allow_header_overrides: bool,

    /// Upper bound for one backend call, in seconds
    #[arg(long, env = "POLICY_REQUEST_TIMEOUT_SECS", default_value = "120")]
    pub request_timeout: u64,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// `true` only for a case-insensitive `true`; every other value is `false`.
fn parse_flag(value: &str) -> Result<bool, std::convert::Infallible> {
    Ok(value.eq_ignore_ascii_case("true"))
}

impl Cli {
    pub fn into_config(self) -> SidecarConfig {
        SidecarConfig {
            backend_url: self.backend_url,
            api_token: self.api_token,
            policy_defaults: PolicyDefaults {
                strip_thinking_response: self.strip_thinking_default,
                disable_thinking: self.disable_thinking_default,
                enable_web_search: self.web_search_default,
                enable_web_citations: self.citations_default,
                include_search_results_in_stream: self.include_results_default,
                include_venice_system_prompt: self.include_system_prompt_default,
            },
            allow_header_overrides: self.allow_header_overrides,
            request_timeout_secs: self.request_timeout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("policy-sidecar").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("1").unwrap());
        assert!(!parse_flag("yes").unwrap());
        assert!(!parse_flag("").unwrap());
    }

    #[test]
    fn test_explicit_flags_map_to_config() {
        let config = parse(&[
            "--backend-url",
            "http://gateway:9000/",
            "--api-token",
            "secret",
            "--strip-thinking-default",
            "False",
            "--web-search-default",
            "auto",
            "--citations-default",
            "True",
            "--allow-header-overrides",
            "no",
            "--request-timeout",
            "30",
        ])
        .into_config();

        assert_eq!(config.backend_url, "http://gateway:9000/");
        assert_eq!(config.api_token, "secret");
        assert!(!config.policy_defaults.strip_thinking_response);
        assert!(config.policy_defaults.disable_thinking);
        assert_eq!(config.policy_defaults.enable_web_search, WebSearchMode::Auto);
        assert!(config.policy_defaults.enable_web_citations);
        assert!(!config.allow_header_overrides);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_web_search_default_is_rejected() {
        let result = Cli::try_parse_from(["policy-sidecar", "--web-search-default", "always"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_web_search_default_is_case_sensitive() {
        let result = Cli::try_parse_from(["policy-sidecar", "--web-search-default", "Auto"]);
        assert!(result.is_err());
    }
}
