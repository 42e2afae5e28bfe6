use crate::host::Router;

/// Path of a channel within a team, e.g. `/team/channels/town-square`.
pub fn channel_path(team_url: &str, channel_name: &str) -> String {
    let team = team_url.strip_prefix('/').unwrap_or(team_url);
    format!("/{team}/channels/{channel_name}")
}

pub fn navigate_to_channel(router: &dyn Router, team_url: &str, channel_name: &str) {
    router.push(&channel_path(team_url, channel_name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_channel_path_strips_one_leading_slash() {
        assert_eq!(channel_path("/team", "dm"), "/team/channels/dm");
        assert_eq!(channel_path("team", "dm"), "/team/channels/dm");
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Router for Recorder {
        fn push(&self, path: &str) {
            self.0.lock().unwrap().push(path.to_string());
        }
    }

    #[test]
    fn test_navigate_pushes_path() {
        let router = Recorder::default();
        navigate_to_channel(&router, "/ad-1", "user1__feedbackbot");
        assert_eq!(
            *router.0.lock().unwrap(),
            vec!["/ad-1/channels/user1__feedbackbot".to_string()]
        );
    }
}
