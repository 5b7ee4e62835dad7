//! Networking feed.
//!
//! Flexible opportunities to apply to, coffee chats to book, and a small
//! community forum. Everything lives in memory and is keyed by numeric id.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Author recorded on replies written by the current user.
pub const REPLY_AUTHOR: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: u32,
    pub title: String,
    /// Time commitment and location, e.g. "2 hours • Remote".
    pub commitment: String,
    pub tag: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeChat {
    pub id: u32,
    pub title: String,
    pub when: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: u32,
    pub author: String,
    pub text: String,
    pub likes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkingHub {
    #[serde(default)]
    opportunities: Vec<Opportunity>,
    #[serde(default)]
    applied: BTreeSet<u32>,
    #[serde(default)]
    chats: Vec<CoffeeChat>,
    #[serde(default)]
    scheduled: BTreeSet<u32>,
    #[serde(default)]
    posts: Vec<ForumPost>,
}

fn reply(id: u32, author: &str, text: &str, likes: u32) -> Reply {
    Reply {
        id,
        author: author.into(),
        text: text.into(),
        likes,
    }
}

impl NetworkingHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// The community feed shown to a new user.
    pub fn sample() -> Self {
        let opportunity = |id, title: &str, commitment: &str, tag: &str, details: &str| Opportunity {
            id,
            title: title.into(),
            commitment: commitment.into(),
            tag: tag.into(),
            details: details.into(),
        };
        let chat = |id, title: &str, when: &str| CoffeeChat {
            id,
            title: title.into(),
            when: when.into(),
        };
        Self {
            opportunities: vec![
                opportunity(
                    1,
                    "UX Workshop",
                    "2 hours • Remote",
                    "Workshop",
                    "Hands-on session on user research and prototyping for beginners.",
                ),
                opportunity(
                    2,
                    "Part-Time Data Analyst",
                    "10 hours/week • Remote",
                    "Part-Time",
                    "Analyze datasets for a nonprofit with a flexible schedule.",
                ),
                opportunity(
                    3,
                    "Tech Conference Speaker",
                    "1 hour • Virtual",
                    "Speaking",
                    "Share your career journey in a short virtual talk.",
                ),
            ],
            applied: BTreeSet::new(),
            chats: vec![
                chat(1, "Chat with Priya, AI Dev", "Tomorrow, 10 AM • 15 mins"),
                chat(2, "Chat with Aisha, UX Designer", "Next Wed, 2 PM • 15 mins"),
                chat(3, "Chat with Lena, Product Manager", "Next Fri, 11 AM • 15 mins"),
            ],
            scheduled: BTreeSet::new(),
            posts: vec![
                ForumPost {
                    id: 1,
                    title: "How do you handle crunch time with kids?".into(),
                    author: "Sarah".into(),
                    replies: vec![
                        reply(
                            1,
                            "Maya",
                            "I set strict boundaries and communicate them clearly with my team!",
                            3,
                        ),
                        reply(
                            2,
                            "Lena",
                            "Try batching tasks and blocking focus time on your calendar.",
                            2,
                        ),
                    ],
                },
                ForumPost {
                    id: 2,
                    title: "Just landed my first tech role!".into(),
                    author: "Maya".into(),
                    replies: vec![
                        reply(1, "Aisha", "Congratulations! That's amazing news!", 5),
                        reply(2, "Priya", "So happy for you! You've earned it.", 4),
                    ],
                },
                ForumPost {
                    id: 3,
                    title: "Need advice on negotiating salary".into(),
                    author: "Fatima".into(),
                    replies: vec![
                        reply(1, "Sarah", "Research market rates and know your worth.", 6),
                        reply(2, "Lena", "I always ask for 10% more than their offer.", 3),
                    ],
                },
            ],
        }
    }

    // ── Opportunities ────────────────────────────────────────────────

    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    /// Mark an opportunity as applied. Returns false if it already was.
    pub fn apply(&mut self, id: u32) -> Result<bool> {
        if !self.opportunities.iter().any(|o| o.id == id) {
            return Err(CoreError::not_found("opportunity", id.to_string()));
        }
        let new = self.applied.insert(id);
        if new {
            tracing::info!(id, "applied to opportunity");
        }
        Ok(new)
    }

    pub fn has_applied(&self, id: u32) -> bool {
        self.applied.contains(&id)
    }

    // ── Coffee chats ─────────────────────────────────────────────────

    pub fn chats(&self) -> &[CoffeeChat] {
        &self.chats
    }

    /// Book a chat. Returns false if it was already booked.
    pub fn schedule_chat(&mut self, id: u32) -> Result<bool> {
        self.chat_exists(id)?;
        let new = self.scheduled.insert(id);
        if new {
            tracing::info!(id, "coffee chat scheduled");
        }
        Ok(new)
    }

    /// Cancel a booking. Returns false if the chat was not booked.
    pub fn cancel_chat(&mut self, id: u32) -> Result<bool> {
        self.chat_exists(id)?;
        Ok(self.scheduled.remove(&id))
    }

    pub fn is_scheduled(&self, id: u32) -> bool {
        self.scheduled.contains(&id)
    }

    fn chat_exists(&self, id: u32) -> Result<()> {
        if self.chats.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(CoreError::not_found("coffee chat", id.to_string()))
        }
    }

    // ── Forum ────────────────────────────────────────────────────────

    pub fn posts(&self) -> &[ForumPost] {
        &self.posts
    }

    /// Append a reply from the current user. Blank text is ignored and
    /// yields `None`.
    pub fn reply(&mut self, post_id: u32, text: &str) -> Result<Option<&Reply>> {
        let post = self.post_mut(post_id)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let id = post.replies.len() as u32 + 1;
        post.replies.push(reply(id, REPLY_AUTHOR, text, 0));
        tracing::info!(post = post_id, reply = id, "forum reply added");
        Ok(post.replies.last())
    }

    /// Add a like to a reply; returns its new like count.
    pub fn like_reply(&mut self, post_id: u32, reply_id: u32) -> Result<u32> {
        let post = self.post_mut(post_id)?;
        let reply = post
            .replies
            .iter_mut()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| CoreError::not_found("reply", format!("{post_id}/{reply_id}")))?;
        reply.likes += 1;
        Ok(reply.likes)
    }

    fn post_mut(&mut self, id: u32) -> Result<&mut ForumPost> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::not_found("forum post", id.to_string()))
    }
}
