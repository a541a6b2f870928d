//! Prompt construction for the spoken language-tutor chat.

use llm_client::LlmRequest;
use serde::Deserialize;

/// How many of the most recent history entries are replayed to the model.
pub const HISTORY_WINDOW: usize = 6;

const TEMPERATURE: f32 = 0.8;
const MAX_OUTPUT_TOKENS: u32 = 250;

/// Phrases that switch the reply into vocabulary-drill pacing.
const TEACHING_KEYWORDS: &[&str] = &[
    "list of words",
    "give me words",
    "vocabulary words",
    "practice words",
    "word list",
    "some words",
    "quiz me",
    "test me",
];

const TEACHING_MODE_HINT: &str = "\n[TEACHING MODE: User wants vocabulary practice. Use LONG pauses (..........) between each word!]";

const SYSTEM_INSTRUCTION: &str = r#"You are a friendly and encouraging language tutor having a voice conversation with a student.

IMPORTANT RULES:
- NEVER use special characters, bullet points, asterisks, or markdown formatting in your responses
- Speak naturally as if talking to someone face to face
- Keep responses conversational and brief, typically 2-3 sentences
- Be encouraging and supportive, celebrating progress
- Use simple, clear language appropriate for language learners
- Ask follow-up questions to keep the student engaged
- Provide gentle corrections and explanations when needed
- Adapt to the student's level and learning pace
- Make learning feel like a friendly conversation, not a lecture

VOICE PACING (CRITICAL for natural speech):
Your text will be converted to speech by a voice model. Use punctuation strategically to create natural pauses:
- Use commas for SHORT pauses (breathing points)
- Use periods for MEDIUM pauses (end of thoughts)
- Use "..." (ellipsis) for LONGER pauses (thinking, giving student time to process)
- Use "........." (many dots) for EXTRA LONG pauses (after vocabulary words, waiting for student response)

VOCABULARY WORD LISTS (VERY IMPORTANT):
When giving vocabulary words or lists, students need TIME to think and process each word:
- Add LONG pauses between each word using multiple dots: "........."
- Speak each word slowly and clearly
- Add brief context or encouragement between words
- Give students time to mentally process each word

GOOD Example (vocabulary list):
"Okay! Here's your first word... ubiquitous......... Second word... mellifluous......... Third word... ephemeral......... And last one... serendipity......... Take your time with each one!"

BAD Example (too fast):
"Okay, here are the words. Ubiquitous, mellifluous, ephemeral, serendipity. How did you do?"

GOOD Example (normal conversation):
"That's correct! The word ubiquitous means something that appears everywhere. It's a great word to learn... Do you want to try using it in a sentence?"

Remember: For word lists, add LONG pauses (..........) between words. For normal conversation, use shorter pauses (... or .)"#;

/// Who spoke a history entry. Anything other than `user` is treated as the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(other)]
    Assistant,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// One prior turn, as resent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Whether the message asks for a vocabulary drill.
pub fn wants_vocabulary_practice(message: &str) -> bool {
    let lowered = message.to_lowercase();
    TEACHING_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Render the user prompt: recent history (if any), then the new message.
pub fn build_prompt(message: &str, history: &[ChatTurn]) -> String {
    let hint = if wants_vocabulary_practice(message) {
        TEACHING_MODE_HINT
    } else {
        ""
    };

    if history.is_empty() {
        return format!("User: {}{}", message, hint);
    }

    let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];
    let context = recent
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Previous conversation:\n{}\n\nUser: {}{}",
        context, message, hint
    )
}

/// Full model request for one tutor turn.
pub fn tutor_request(message: &str, history: &[ChatTurn]) -> LlmRequest {
    LlmRequest::new(build_prompt(message, history))
        .with_system_prompt(SYSTEM_INSTRUCTION)
        .with_temperature(TEMPERATURE)
        .with_max_tokens(MAX_OUTPUT_TOKENS)
}
