//! Prompt text sent to the text-generation backend, and the canned replies
//! used when it has nothing useful to say.

use crate::catalog::{BodyContent, Language};

/// Default model requested by the explorer.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Build the full prompt for a question about one body.
///
/// The persona, the body context and the length cap all live in the prompt;
/// the backend receives nothing else.
pub fn build_prompt(content: &BodyContent, question: &str, lang: Language) -> String {
    let question = question.trim();
    match lang {
        Language::Zh => format!(
            "你是一位专业的天文学家，正在向公众科普。\n\
             用户正在询问关于行星：{name} 的问题。\n\
             关于该行星的背景信息：{detail}。类型：{kind}。\n\
             用户问题：\"{question}\"\n\
             请提供简明、科学准确且引人入胜的回答（不超过3句话）。\n\
             请使用充满好奇心和探索精神的语气。\n\
             请用中文回答。",
            name = content.name,
            detail = content.detail,
            kind = content.kind,
        ),
        Language::En => format!(
            "You are an expert astronomer educating the public.\n\
             The user is asking about the planet: {name}.\n\
             Context about this planet: {detail}. Type: {kind}.\n\
             User Question: \"{question}\"\n\
             Provide a concise, scientifically accurate, yet engaging answer (max 3 sentences).\n\
             Use a tone that implies wonder and curiosity.\n\
             Please answer in English.",
            name = content.name,
            detail = content.detail,
            kind = content.kind,
        ),
    }
}

/// Reply shown when the backend answered with no text.
pub fn empty_answer(lang: Language) -> &'static str {
    match lang {
        Language::En => "I couldn't find an answer in the stars right now.",
        Language::Zh => "星星现在保持沉默。",
    }
}

/// Reply shown when the request failed for any reason.
pub fn failure_answer(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "Communications with the deep space network are currently down. Please try again."
        }
        Language::Zh => "深空通讯暂时中断，请稍后再试。",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn prompt_carries_body_context() {
        let catalog = Catalog::solar_system();
        let earth = catalog.get("earth").unwrap();
        let prompt = build_prompt(earth.content(Language::En), "  Why is it blue? ", Language::En);
        assert!(prompt.contains("The user is asking about the planet: Earth."));
        assert!(prompt.contains("Type: Terrestrial."));
        assert!(prompt.contains("User Question: \"Why is it blue?\""));
        assert!(prompt.contains("max 3 sentences"));
        assert!(prompt.ends_with("Please answer in English."));
    }

    #[test]
    fn chinese_prompt_is_localized() {
        let catalog = Catalog::solar_system();
        let mars = catalog.get("mars").unwrap();
        let prompt = build_prompt(mars.content(Language::Zh), "为什么是红色？", Language::Zh);
        assert!(prompt.contains("用户正在询问关于行星：火星 的问题。"));
        assert!(prompt.contains("不超过3句话"));
        assert!(prompt.ends_with("请用中文回答。"));
    }

    #[test]
    fn fallbacks_differ_by_cause() {
        for lang in [Language::En, Language::Zh] {
            assert_ne!(empty_answer(lang), failure_answer(lang));
        }
        assert_eq!(empty_answer(Language::Zh), "星星现在保持沉默。");
    }
}
