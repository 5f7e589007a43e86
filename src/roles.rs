use iced::Color;
use serde::{Deserialize, Serialize};

/// Role a person holds within a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Hr, Role::Manager, Role::Employee];

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Hr => "HR",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    /// Badge colour
    pub fn color(self) -> Color {
        match self {
            Role::Admin => Color::from_rgb(0.85, 0.35, 0.35),
            Role::Hr => Color::from_rgb(0.65, 0.45, 0.85),
            Role::Manager => Color::from_rgb(0.35, 0.55, 0.85),
            Role::Employee => Color::from_rgb(0.45, 0.7, 0.5),
        }
    }
}

/// Lifecycle state of a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub const ALL: [LeaveStatus; 4] = [
        LeaveStatus::Pending,
        LeaveStatus::Approved,
        LeaveStatus::Rejected,
        LeaveStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
            LeaveStatus::Cancelled => "Cancelled",
        }
    }

    pub fn color(self) -> Color {
        match self {
            LeaveStatus::Pending => Color::from_rgb(0.9, 0.7, 0.3),
            LeaveStatus::Approved => Color::from_rgb(0.4, 0.75, 0.45),
            LeaveStatus::Rejected => Color::from_rgb(0.85, 0.35, 0.35),
            LeaveStatus::Cancelled => Color::from_rgb(0.55, 0.55, 0.6),
        }
    }
}
