//! Navigation away from the lobby.

use derive_getters::Getters;
use reqwest::Url;

use crate::GameId;

/// A redirect to another page of the game server.
///
/// Entering a game replaces the lobby entirely; the host acts on this value
/// after tearing the lobby view down.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Navigation {
    /// Game whose page is the target.
    game_id: GameId,
}

impl Navigation {
    /// Navigation to the page of game `id`.
    pub fn to_game(id: &GameId) -> Self {
        Self {
            game_id: id.clone(),
        }
    }

    /// Readable server-relative path, e.g. `/game/g1`. Not percent-encoded;
    /// use [`Navigation::url`] for an address.
    pub fn path(&self) -> String {
        format!("/game/{}", self.game_id)
    }

    /// Absolute URL of the target page under `base`, keeping any base path
    /// and encoding the id as one segment. `None` if `base` cannot carry a
    /// path.
    pub fn url(&self, base: &Url) -> Option<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["game", self.game_id.as_str()]);
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_path_and_url() {
        let nav = Navigation::to_game(&GameId::new("g1"));
        assert_eq!(nav.path(), "/game/g1");

        let base = Url::parse("http://localhost:3000/").unwrap();
        assert_eq!(
            nav.url(&base).map(|u| u.to_string()).as_deref(),
            Some("http://localhost:3000/game/g1")
        );
    }

    #[test]
    fn url_keeps_base_path_and_encodes_id() {
        let nav = Navigation::to_game(&GameId::new("a#b"));

        let with_slash = Url::parse("http://host/lobby/").unwrap();
        let url = nav.url(&with_slash).unwrap();
        assert_eq!(url.as_str(), "http://host/lobby/game/a%23b");
        assert_eq!(url.fragment(), None);

        let without_slash = Url::parse("http://host/lobby").unwrap();
        assert_eq!(
            nav.url(&without_slash).map(|u| u.to_string()).as_deref(),
            Some("http://host/lobby/game/a%23b")
        );
    }

    #[test]
    fn url_matches_api_endpoint_layout() {
        let nav = Navigation::to_game(&GameId::new("Friday night / 4"));
        let base = Url::parse("http://localhost:3000").unwrap();
        assert_eq!(
            nav.url(&base).map(|u| u.to_string()).as_deref(),
            Some("http://localhost:3000/game/Friday%20night%20%2F%204")
        );
    }

    #[test]
    fn cannot_be_a_base_url_gives_none() {
        let nav = Navigation::to_game(&GameId::new("g1"));
        let base = Url::parse("mailto:lobby@example.com").unwrap();
        assert!(nav.url(&base).is_none());
    }
}
