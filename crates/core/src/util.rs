use crate::config::ActionEnv;

/// Human-viewable URL for the invoking workflow run, used as the check run
/// details link.
pub fn run_url(action: &ActionEnv) -> String {
    format!("{}/{}/actions/runs/{}", action.server_url, action.repository, action.run_id)
}

#[cfg(test)]
mod tests {
    use super::run_url;
    use crate::config::ActionEnv;

    #[test]
    fn test_run_url() {
        let action = ActionEnv {
            server_url: "https://github.com".to_string(),
            repository: "neoforged/jcc".to_string(),
            run_id: "10840000123".to_string(),
            event_path: "event.json".into(),
        };
        assert_eq!(run_url(&action), "https://github.com/neoforged/jcc/actions/runs/10840000123");
    }
}
