/// Build the avatar reference attached to a record at registration.
///
/// Image generation itself lives outside this service; we only store a
/// deterministic reference into the external generator, seeded by the
/// username.
pub fn avatar_url(username: &str) -> String {
    format!(
        "https://api.dicebear.com/9.x/identicon/svg?seed={}",
        urlencoding::encode(username)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_url_is_deterministic() {
        assert_eq!(avatar_url("bob"), avatar_url("bob"));
        assert_ne!(avatar_url("bob"), avatar_url("alice"));
    }

    #[test]
    fn test_avatar_url_escapes_reserved_characters() {
        let url = avatar_url("a b&c");
        assert!(url.ends_with("seed=a%20b%26c"));
    }
}
