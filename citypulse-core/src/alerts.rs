use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertLevel {
    High,
    Medium,
    Info,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertLevel::High => "High",
            AlertLevel::Medium => "Medium",
            AlertLevel::Info => "Info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: AlertLevel,
}

struct StaticAlert {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    level: AlertLevel,
}

const ALERTS: &[StaticAlert] = &[
    StaticAlert {
        id: "1",
        title: "Heavy rain warning",
        description: "Avoid low-lying roads between 6pm-10pm. Metro running at reduced speed.",
        level: AlertLevel::High,
    },
    StaticAlert {
        id: "2",
        title: "Traffic congestion",
        description: "Major jam near Central Square due to repair work. Use Ring Road detour.",
        level: AlertLevel::Medium,
    },
    StaticAlert {
        id: "3",
        title: "Community drive",
        description: "Blood donation camp at City Hospital this Saturday, 9am-2pm.",
        level: AlertLevel::Info,
    },
    StaticAlert {
        id: "4",
        title: "Water supply update",
        description: "Maintenance in Sector 12 tonight. Storage advised, supply back by 6am.",
        level: AlertLevel::Medium,
    },
];

/// Local alerts shown on the alerts screen.
pub fn local_alerts() -> Vec<Alert> {
    ALERTS
        .iter()
        .map(|a| Alert {
            id: a.id.to_owned(),
            title: a.title.to_owned(),
            description: a.description.to_owned(),
            level: a.level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn alerts_have_unique_ids() {
        let alerts = local_alerts();
        assert_eq!(alerts.len(), 4);
        let ids: HashSet<_> = alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), alerts.len());
        assert_eq!(alerts[0].level, AlertLevel::High);
        assert_eq!(alerts[0].level.to_string(), "High");
    }
}
