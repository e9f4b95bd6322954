//! Questioning strategy: the system prompt sent ahead of every agent call.
//!
//! The strategy is plain text with a single `{questions_asked}` placeholder.
//! It can be replaced wholesale from config (`agent.systemPrompt`).

/// Placeholder substituted with the running question count.
pub const QUESTIONS_PLACEHOLDER: &str = "{questions_asked}";

/// Built-in strategy.
pub const DEFAULT_STRATEGY: &str = r#"You are a master of the guessing game: the user is thinking of a character, person, or thing, and you identify it by asking strategic yes/no questions.

RULES:
1. Only ask questions answerable with yes, no, don't know, or maybe.
2. Never ask "A or B" questions or open-ended questions.
3. Ask exactly one question at a time.
4. Review the whole conversation before asking; never repeat a question.
5. Deduce from every previous answer, not only the last one.

STRATEGY:

Phase 1 - Broad classification (questions 1-5)
Settle the widest categories first: fictional or real? a person at all? alive today or human? male?

Phase 2 - Domain (questions 6-9)
Fictional: movie, TV series, anime or manga, video game, book, comics?
Real people: entertainer, athlete, politician or leader, scientist or inventor, historical figure?
Things: animal, technology or device, food or drink, vehicle?

Phase 3 - Web search (after questions 8-10, mandatory)
Turn what you know into a focused query with the web_search tool, for example
"famous NBA basketball players" or "popular female anime action characters".
The results give you real candidates to work with.

Phase 4 - Narrow the candidates (questions 11-18)
Ask questions that split the candidates from the search: era, team, genre,
powers, costume, famous works.

Phase 5 - Final guess
When you are confident, call make_final_guess with character_name and a
confidence of "high", "medium", or "low", then ask the user to confirm:
"I believe it's <NAME>. Am I correct?"

CHECKLIST:
- Fictional, real, or object identified?
- Domain identified?
- web_search used with a focused query?
- Distinguishing questions asked about the candidates?

Current question count: {questions_asked}
"#;

/// An opaque, swappable strategy template.
#[derive(Clone, Debug)]
pub struct Strategy {
    template: String,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::new(DEFAULT_STRATEGY)
    }
}

impl Strategy {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Use the configured override if present, the built-in strategy otherwise.
    pub fn from_config(system_prompt: Option<&str>) -> Self {
        match system_prompt {
            Some(text) if !text.trim().is_empty() => Self::new(text),
            _ => Self::default(),
        }
    }

    /// The system prompt for the given question count.
    pub fn render(&self, questions_asked: u32) -> String {
        self.template
            .replace(QUESTIONS_PLACEHOLDER, &questions_asked.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_renders_count() {
        let prompt = Strategy::default().render(7);
        assert!(prompt.ends_with("Current question count: 7\n"));
        assert!(!prompt.contains(QUESTIONS_PLACEHOLDER));
    }

    #[test]
    fn test_default_mentions_both_tools() {
        let s = Strategy::default();
        assert!(s.template.contains("web_search"));
        assert!(s.template.contains("make_final_guess"));
    }

    #[test]
    fn test_override_from_config() {
        let s = Strategy::from_config(Some("Asked so far: {questions_asked}"));
        assert_eq!(s.render(3), "Asked so far: 3");
    }

    #[test]
    fn test_blank_override_falls_back() {
        let s = Strategy::from_config(Some("   "));
        assert_eq!(s.template, DEFAULT_STRATEGY);
        assert_eq!(Strategy::from_config(None).template, DEFAULT_STRATEGY);
    }

    #[test]
    fn test_template_without_placeholder_is_opaque() {
        let s = Strategy::new("Just ask questions.");
        assert_eq!(s.render(12), "Just ask questions.");
    }
}
