use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of remote entity exposed by Apex Home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Notification,
    User,
    Page,
    Totp,
    NetworkDevices,
    Settings,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Notification,
        Resource::User,
        Resource::Page,
        Resource::Totp,
        Resource::NetworkDevices,
        Resource::Settings,
    ];

    /// Wire name used in parameters and node descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Notification => "notification",
            Resource::User => "user",
            Resource::Page => "page",
            Resource::Totp => "totp",
            Resource::NetworkDevices => "networkDevices",
            Resource::Settings => "settings",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Resource::Notification => "Notification",
            Resource::User => "User",
            Resource::Page => "Page",
            Resource::Totp => "TOTP",
            Resource::NetworkDevices => "Network Devices",
            Resource::Settings => "Settings",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action applied to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Create,
    Update,
    List,
    Info,
    Delete,
    Publish,
    Send,
    Backup,
    ChangeTheme,
    ChangeLocation,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::Create,
        Operation::Update,
        Operation::List,
        Operation::Info,
        Operation::Delete,
        Operation::Publish,
        Operation::Send,
        Operation::Backup,
        Operation::ChangeTheme,
        Operation::ChangeLocation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::List => "list",
            Operation::Info => "info",
            Operation::Delete => "delete",
            Operation::Publish => "publish",
            Operation::Send => "send",
            Operation::Backup => "backup",
            Operation::ChangeTheme => "changeTheme",
            Operation::ChangeLocation => "changeLocation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::List => "List",
            Operation::Info => "Info",
            Operation::Delete => "Delete",
            Operation::Publish => "Publish",
            Operation::Send => "Send",
            Operation::Backup => "Backup",
            Operation::ChangeTheme => "Change Theme",
            Operation::ChangeLocation => "Change Location",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
