//! Balance Buddy: a scripted wellbeing chatbot.
//!
//! Replies are picked by keyword. The first matching mood group wins, in
//! the order listed in [`Mood::ALL`]. Every reply ends with a small
//! self-care nudge chosen at random.

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

pub const GREETING: &str =
    "Hey there! I'm your Balance Buddy AI. How's your day going so far? What's on your mind?";

const NUDGES: [&str; 3] = [
    "By the way, have you had a glass of water recently? Staying hydrated can really lift your mood!",
    "Quick nudge: a 5-minute stretch could do wonders if you've been sitting for a while!",
    "Hey, just a thought: taking a moment to step outside for fresh air might feel refreshing.",
];

/// Mood inferred from a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Stressed,
    Tired,
    Happy,
    Sad,
    Balance,
    Sleep,
    Angry,
    Lonely,
    Bored,
    Grateful,
    Neutral,
}

impl Mood {
    /// Keyword groups in match priority. `Neutral` is the fallback.
    pub const ALL: [Mood; 10] = [
        Mood::Stressed,
        Mood::Tired,
        Mood::Happy,
        Mood::Sad,
        Mood::Balance,
        Mood::Sleep,
        Mood::Angry,
        Mood::Lonely,
        Mood::Bored,
        Mood::Grateful,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Mood::Stressed => &["stress", "anxious", "overwhelmed"],
            Mood::Tired => &["tired", "exhausted", "burnout"],
            Mood::Happy => &["happy", "good", "great"],
            Mood::Sad => &["sad", "down", "depressed"],
            Mood::Balance => &["balance", "work life", "work-life"],
            Mood::Sleep => &["sleep", "insomnia", "rest"],
            Mood::Angry => &["angry", "mad", "frustrated"],
            Mood::Lonely => &["lonely", "alone", "isolated"],
            Mood::Bored => &["bored", "nothing to do"],
            Mood::Grateful => &["thanks", "thank you"],
            Mood::Neutral => &[],
        }
    }

    /// Substring match on the lower-cased message.
    pub fn detect(message: &str) -> Mood {
        let text = message.to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.keywords().iter().any(|k| text.contains(k)))
            .unwrap_or(Mood::Neutral)
    }

    pub fn script(self) -> &'static str {
        match self {
            Mood::Stressed => "It sounds like things are feeling a bit heavy right now, totally get that. When I'm stressed, I find it helps to step back and breathe: try inhaling for 4 seconds, holding for 4, and exhaling for 4. Want to give it a go? Or maybe tell me what's stressing you out so we can tackle it together?",
            Mood::Tired => "Oh, I feel you. Being tired can really weigh you down. Have you tried a quick power nap lately, like 10-20 minutes? It's a game-changer. Or maybe a snack with some protein could give you a boost. What's been draining your energy?",
            Mood::Happy => "Love hearing that you're doing well! What's sparking that good vibe today? Let's keep that energy flowing. Maybe share it with someone or jot it down to look back on later?",
            Mood::Sad => "I'm really sorry you're feeling that way. It's tough, and you're not alone in this. Sometimes it helps to do something small, like listening to a favorite song or wrapping up in a cozy blanket. Want to talk about what's been going on? I'm here for you.",
            Mood::Balance => "Work-life balance can be tricky to nail down, huh? One thing that works is setting a hard stop, like no work emails after 7 PM. What's throwing your balance off lately? Let's figure out a small step to ease things up.",
            Mood::Sleep => "Sleep can be elusive sometimes, right? A little trick is to dim the lights and skip screens 30 minutes before bed. It helps your brain wind down. What's been keeping you up?",
            Mood::Angry => "Ugh, frustration's the worst, I get it. Want to blow off some steam? Try squeezing a stress ball or writing down what's ticking you off, then shredding it. What happened to get you fired up?",
            Mood::Lonely => "Feeling lonely can sneak up on anyone, and it's okay to feel that way. How about reaching out to someone, even just a quick text? Or we could chat more if you'd like. I'm here.",
            Mood::Bored => "Boredom's a drag, isn't it? How about picking up something small to shake things up, like doodling or trying a new recipe? What's something you've been curious about lately?",
            Mood::Grateful => "You're welcome! I'm just happy to chat with you. How's everything else going today?",
            Mood::Neutral => "Hmm, I'm picking up on what you're saying, thanks for sharing! Want to dive deeper into something specific? I'm all ears, and I've got some ideas if you need them.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u32,
    pub text: String,
    pub sender: Sender,
}

/// A single conversation with the bot.
#[derive(Debug, Clone)]
pub struct BalanceBuddy {
    messages: Vec<ChatMessage>,
    rng: Mcg128Xsl64,
}

impl BalanceBuddy {
    pub fn new() -> Self {
        Self::from_rng(Mcg128Xsl64::from_entropy())
    }

    /// Deterministic nudges for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Mcg128Xsl64::seed_from_u64(seed))
    }

    fn from_rng(rng: Mcg128Xsl64) -> Self {
        Self {
            messages: vec![ChatMessage {
                id: 1,
                text: GREETING.to_string(),
                sender: Sender::Bot,
            }],
            rng,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Record a user message and return the bot's reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mood = Mood::detect(input);
        tracing::debug!(?mood, "chat message classified");

        self.push(input.to_string(), Sender::User);
        let reply = format!("{} {}", mood.script(), self.nudge());
        self.push(reply, Sender::Bot);
        self.messages.last()
    }

    fn nudge(&mut self) -> &'static str {
        NUDGES[self.rng.gen_range(0..NUDGES.len())]
    }

    fn push(&mut self, text: String, sender: Sender) {
        let id = self.messages.len() as u32 + 1;
        self.messages.push(ChatMessage { id, text, sender });
    }
}

impl Default for BalanceBuddy {
    fn default() -> Self {
        Self::new()
    }
}
