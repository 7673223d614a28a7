use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Declares a fixed option set that travels over the wire as its display label.
macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CatalogError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let needle = raw.trim();
                $(
                    if needle.eq_ignore_ascii_case($label)
                        $(|| needle.eq_ignore_ascii_case($alias))*
                    {
                        return Ok($name::$variant);
                    }
                )+
                Err(CatalogError::Unknown {
                    kind: $kind,
                    value: raw.to_string(),
                })
            }
        }
    };
}

catalog_enum! {
    /// Social networks the generator writes copy for.
    Platform, "platform" {
        Instagram => "Instagram",
        Facebook => "Facebook",
        LinkedIn => "LinkedIn",
        X => "X" | "twitter",
        TikTok => "TikTok",
    }
}

catalog_enum! {
    Tone, "tone" {
        FriendlyAndProfessional => "friendly and professional",
        WarmAndInviting => "warm and inviting",
        PlayfulAndFun => "playful and fun",
        LuxuriousAndSophisticated => "luxurious and sophisticated",
        CasualAndRelaxed => "casual and relaxed",
        UrgentAndExciting => "urgent and exciting",
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::FriendlyAndProfessional
    }
}

catalog_enum! {
    /// UK calendar tie-ins a campaign can be themed around.
    SeasonalHook, "seasonal hook" {
        Spring => "Spring",
        Summer => "Summer",
        Autumn => "Autumn",
        Winter => "Winter",
        NewYear => "New Year",
        ValentinesDay => "Valentine's Day" | "valentines day",
        MothersDay => "Mother's Day" | "mothers day",
        Easter => "Easter",
        FathersDay => "Father's Day" | "fathers day",
        BankHolidayWeekend => "Bank Holiday Weekend",
        SummerHolidays => "Summer Holidays",
        BackToSchool => "Back to School",
        Halloween => "Halloween",
        BonfireNight => "Bonfire Night",
        BlackFriday => "Black Friday",
        Christmas => "Christmas",
        BoxingDay => "Boxing Day",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

/// Parses a comma separated platform list, keeping first-seen order and
/// dropping repeats.
pub fn parse_platforms(raw: &str) -> Result<Vec<Platform>, CatalogError> {
    let mut platforms = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let platform: Platform = part.parse()?;
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    if platforms.is_empty() {
        return Err(CatalogError::NoPlatforms);
    }
    Ok(platforms)
}
