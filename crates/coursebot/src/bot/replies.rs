/// Chat replies for each trigger outcome
use crate::service::{ChoiceOutcome, RegisterOutcome};

pub const INVALID_NAME: &str = "⚠️ 姓名格式不正確，請輸入兩到三個中文字。";
pub const ALREADY_REGISTERED: &str = "你已經註冊過囉 ✅";
pub const QUERY_NOT_REGISTERED: &str = "⚠️ 請先使用 `/註冊姓名` 註冊你的名字！";
pub const CHOICE_NOT_REGISTERED: &str = "⚠️ 尚未註冊姓名，請先使用 `/註冊姓名`。";
pub const QUERY_FAILED: &str = "查詢時發生錯誤，請稍後再試！";
pub const ACTION_FAILED: &str = "發生錯誤，請稍後再試。";

pub fn register(outcome: &RegisterOutcome) -> String {
    match outcome {
        RegisterOutcome::InvalidName => INVALID_NAME.to_string(),
        RegisterOutcome::AlreadyRegistered => ALREADY_REGISTERED.to_string(),
        RegisterOutcome::Registered { display_name } => {
            format!("感謝你，{display_name}！我已記住你囉 😄")
        }
    }
}

pub fn choice(outcome: &ChoiceOutcome) -> String {
    match outcome {
        ChoiceOutcome::NotRegistered => CHOICE_NOT_REGISTERED.to_string(),
        ChoiceOutcome::ColumnNotFound { display_name } => {
            format!("⚠️ 找不到對應欄位「{display_name}」，請聯絡管理員！")
        }
        ChoiceOutcome::Recorded {
            display_name,
            choice,
            signup_row,
        } => format!("✅ {display_name} 已選擇「{choice}」，已寫入報名表第 {signup_row} 列。"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::OfferChoice;

    #[test]
    fn test_register_replies() {
        assert_eq!(register(&RegisterOutcome::InvalidName), INVALID_NAME);
        assert_eq!(register(&RegisterOutcome::AlreadyRegistered), "你已經註冊過囉 ✅");
        assert_eq!(
            register(&RegisterOutcome::Registered {
                display_name: "小明".to_string()
            }),
            "感謝你，小明！我已記住你囉 😄"
        );
    }

    #[test]
    fn test_choice_replies() {
        assert_eq!(
            choice(&ChoiceOutcome::Recorded {
                display_name: "小明".to_string(),
                choice: OfferChoice::Either,
                signup_row: 9,
            }),
            "✅ 小明 已選擇「歐都給」，已寫入報名表第 9 列。"
        );
        assert_eq!(
            choice(&ChoiceOutcome::ColumnNotFound {
                display_name: "小美".to_string()
            }),
            "⚠️ 找不到對應欄位「小美」，請聯絡管理員！"
        );
        assert_eq!(choice(&ChoiceOutcome::NotRegistered), CHOICE_NOT_REGISTERED);
    }
}
