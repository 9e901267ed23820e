use crate::config::ShopConfig;
use crate::countdown::CountdownStatus;
use crate::model::ShoppingListItem;
use crate::order::DisplayItem;
use std::path::{Path, PathBuf};

pub mod add;
pub mod config;
pub mod counter;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod toggle;

/// Where shoplist keeps its files.
#[derive(Debug, Clone)]
pub struct ShopPaths {
    pub data_dir: PathBuf,
}

impl ShopPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountdownReport {
    pub status: CountdownStatus,
    pub history: Vec<i64>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_items: Vec<ShoppingListItem>,
    pub listed_items: Vec<DisplayItem>,
    pub countdown: Option<CountdownReport>,
    pub config: Option<ShopConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_items(mut self, items: Vec<ShoppingListItem>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_listed_items(mut self, items: Vec<DisplayItem>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_countdown(mut self, report: CountdownReport) -> Self {
        self.countdown = Some(report);
        self
    }

    pub fn with_config(mut self, config: ShopConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Fold another result into this one, keeping message order.
    pub fn absorb(&mut self, other: CmdResult) {
        self.affected_items.extend(other.affected_items);
        self.listed_items.extend(other.listed_items);
        self.messages.extend(other.messages);
        if other.countdown.is_some() {
            self.countdown = other.countdown;
        }
        if other.config.is_some() {
            self.config = other.config;
        }
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
