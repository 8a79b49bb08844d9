//! Classification label to display style mapping.

use std::fmt;

use shared::domain::CategoryInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryStyle {
    ServiceRequests,
    ConsultationRequests,
    Payments,
    #[default]
    Others,
}

impl CategoryStyle {
    pub const ALL: [CategoryStyle; 4] = [
        CategoryStyle::ServiceRequests,
        CategoryStyle::ConsultationRequests,
        CategoryStyle::Payments,
        CategoryStyle::Others,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::ServiceRequests => "service-requests",
            Self::ConsultationRequests => "consultation-requests",
            Self::Payments => "payments",
            Self::Others => "others",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ServiceRequests => "Service Requests",
            Self::ConsultationRequests => "Consultation Requests",
            Self::Payments => "Payments",
            Self::Others => "Others",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ServiceRequests => "Requesting assistance for issues or services",
            Self::ConsultationRequests => "Requesting consultations or meetings",
            Self::Payments => "Payment confirmations and processing",
            Self::Others => "Emails that don't fit other categories",
        }
    }

    pub fn info(self) -> CategoryInfo {
        CategoryInfo {
            label: self.label().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl fmt::Display for CategoryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Resolves the display style for a label. Only exact matches on the three
/// specific labels get their own style; everything else is `Others`.
pub fn style_for(classification: &str) -> CategoryStyle {
    match classification {
        "Service Requests" => CategoryStyle::ServiceRequests,
        "Consultation Requests" => CategoryStyle::ConsultationRequests,
        "Payments" => CategoryStyle::Payments,
        _ => CategoryStyle::default(),
    }
}

/// Built-in catalogue used until (or instead of) the service's categories endpoint.
pub fn builtin_catalogue() -> Vec<CategoryInfo> {
    CategoryStyle::ALL.iter().map(|style| style.info()).collect()
}
