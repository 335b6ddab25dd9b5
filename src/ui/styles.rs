use super::palette;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

pub struct BackgroundStyle;
impl container::StyleSheet for BackgroundStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(palette::BACKGROUND)),
            text_color: Some(palette::TEXT_MAIN),
            ..Default::default()
        }
    }
}

/// Black screen behind the intro.
pub struct NightStyle;
impl container::StyleSheet for NightStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::BLACK)),
            text_color: Some(palette::MATRIX_GREEN),
            ..Default::default()
        }
    }
}

pub struct CardStyle;
impl container::StyleSheet for CardStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(palette::SURFACE)),
            border: Border {
                radius: 12.0.into(),
                width: 1.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 10.0,
            },
            text_color: Some(palette::TEXT_MAIN),
        }
    }
}

/// Error banner above the calendar.
pub struct BannerStyle;
impl container::StyleSheet for BannerStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.8, 0.4, 0.4, 0.15))),
            border: Border {
                radius: 8.0.into(),
                width: 1.0,
                color: palette::DANGER,
            },
            text_color: Some(palette::DANGER),
            ..Default::default()
        }
    }
}

/// Filled dot or pill in a participant's color.
pub struct BadgeStyle(pub Color);
impl container::StyleSheet for BadgeStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(self.0)),
            border: Border {
                radius: 10.0.into(),
                ..Default::default()
            },
            text_color: Some(Color::WHITE),
            ..Default::default()
        }
    }
}

/// Box around one day number on the summary screen.
pub struct DateBoxStyle;
impl container::StyleSheet for DateBoxStyle {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(palette::ACCENT)),
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            text_color: Some(Color::WHITE),
            ..Default::default()
        }
    }
}

pub struct PrimaryButtonStyle;
impl button::StyleSheet for PrimaryButtonStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(palette::ACCENT)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 4.0,
            },
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(palette::ACCENT_HOVER)),
            text_color: Color::WHITE,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
                offset: Vector::new(0.0, 3.0),
                blur_radius: 5.0,
            },
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
    fn disabled(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color::from_rgb(0.8, 0.8, 0.8))),
            text_color: Color::from_rgb(0.5, 0.5, 0.5),
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Month arrows and the banner's close button.
pub struct GhostButtonStyle;
impl button::StyleSheet for GhostButtonStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: palette::TEXT_MUTED,
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.05))),
            text_color: palette::TEXT_MAIN,
            border: Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.hovered(style)
    }
    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}

/// One day of the month grid.
pub struct DayCellStyle {
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCellStyle {
    fn base(&self) -> button::Appearance {
        let background = if self.is_selected {
            Color::from_rgba(0.45, 0.55, 0.50, 0.25)
        } else if self.in_current_month {
            palette::SURFACE
        } else {
            Color::TRANSPARENT
        };
        let text_color = if self.in_current_month {
            palette::TEXT_MAIN
        } else {
            Color::from_rgba(0.0, 0.0, 0.0, 0.25)
        };
        let (border_color, border_width) = if self.is_today {
            (palette::ACCENT, 2.0)
        } else {
            (Color::from_rgba(0.0, 0.0, 0.0, 0.05), 1.0)
        };

        button::Appearance {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                radius: 8.0.into(),
                width: border_width,
                color: border_color,
            },
            ..Default::default()
        }
    }
}

impl button::StyleSheet for DayCellStyle {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        self.base()
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        let mut appearance = self.base();
        if self.in_current_month {
            appearance.shadow = Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 4.0,
            };
        }
        appearance
    }
    fn pressed(&self, _style: &Self::Style) -> button::Appearance {
        self.base()
    }
    fn disabled(&self, _style: &Self::Style) -> button::Appearance {
        self.base()
    }
}
