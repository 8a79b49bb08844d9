use client_core::CategoryStyle;
use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeColors {
    pub fill: Color32,
    pub text: Color32,
    pub stroke: Color32,
}

pub fn badge_colors(style: CategoryStyle) -> BadgeColors {
    match style {
        CategoryStyle::ServiceRequests => BadgeColors {
            fill: Color32::from_rgb(254, 226, 226),
            text: Color32::from_rgb(153, 27, 27),
            stroke: Color32::from_rgb(254, 202, 202),
        },
        CategoryStyle::ConsultationRequests => BadgeColors {
            fill: Color32::from_rgb(219, 234, 254),
            text: Color32::from_rgb(30, 64, 175),
            stroke: Color32::from_rgb(191, 219, 254),
        },
        CategoryStyle::Payments => BadgeColors {
            fill: Color32::from_rgb(220, 252, 231),
            text: Color32::from_rgb(22, 101, 52),
            stroke: Color32::from_rgb(187, 247, 208),
        },
        CategoryStyle::Others => BadgeColors {
            fill: Color32::from_rgb(243, 244, 246),
            text: Color32::from_rgb(31, 41, 55),
            stroke: Color32::from_rgb(229, 231, 235),
        },
    }
}

pub const ERROR_FILL: Color32 = Color32::from_rgb(254, 242, 242);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(153, 27, 27);
pub const ERROR_STROKE: Color32 = Color32::from_rgb(254, 202, 202);
