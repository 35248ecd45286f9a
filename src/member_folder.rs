
const FOLDER_BASE_URL: &str = "https://www.dropbox.com/home";

pub const INVALID_ID_REPLY: &str = "正しい会員IDを入力してください（最大7桁の数字）";

/// A member identifier as entered in chat: 1 to 7 ASCII decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberId(String);

impl MemberId {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let valid = !text.is_empty()
            && text.len() <= 7
            && text.bytes().all(|byte| byte.is_ascii_digit());
        if valid {
            Some(Self(text.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dropbox path of the member folder, used for the metadata lookup.
    pub fn folder_path(&self) -> String {
        format!("/members/{}", self.0)
    }

    pub fn folder_url(&self) -> String {
        format!("{}{}", FOLDER_BASE_URL, self.folder_path())
    }
}

pub fn folder_reply(member_id: &MemberId, folder_exists: bool) -> String {
    let location = if folder_exists {
        member_id.folder_url()
    } else {
        format!("会員ID {} のフォルダは存在しません", member_id.as_str())
    };
    format!("こちらが会員ID {} のフォルダです：\n{}", member_id.as_str(), location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_to_seven_digits() {
        for text in ["1", "42", "12345", "1234567"] {
            assert!(MemberId::parse(text).is_some(), "{text:?} should parse");
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let member_id = MemberId::parse(" 12345 \n").unwrap();
        assert_eq!(member_id.as_str(), "12345");
    }

    #[test]
    fn rejects_empty_long_and_non_digit_input() {
        for text in ["", "   ", "12345678", "123456789", "12a45", "12 34", "-1234", "１２３４５"] {
            assert!(MemberId::parse(text).is_none(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn folder_url_points_at_members_folder() {
        let member_id = MemberId::parse("12345").unwrap();
        assert_eq!(member_id.folder_path(), "/members/12345");
        assert_eq!(member_id.folder_url(), "https://www.dropbox.com/home/members/12345");
    }

    #[test]
    fn reply_for_existing_folder_contains_url() {
        let member_id = MemberId::parse("12345").unwrap();
        let reply = folder_reply(&member_id, true);
        assert!(reply.contains("https://www.dropbox.com/home/members/12345"));
    }

    #[test]
    fn reply_for_missing_folder_has_no_url() {
        let member_id = MemberId::parse("12345").unwrap();
        let reply = folder_reply(&member_id, false);
        assert!(!reply.contains("https://"));
        assert!(reply.contains("存在しません"));
    }
}
