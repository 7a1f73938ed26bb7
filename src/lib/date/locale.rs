/// Locales the date formatter knows. Anything else formats as English.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Match a BCP-47-like tag on its primary subtag, e.g. `fr-CA` is French.
    pub fn parse(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "fr" => Self::Fr,
            _ => Self::En,
        }
    }

    pub fn months(&self) -> &'static [&'static str; 12] {
        match self {
            Self::En => &[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            Self::Fr => &[
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ],
        }
    }

    pub fn months_short(&self) -> &'static [&'static str; 12] {
        match self {
            Self::En => &[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            Self::Fr => &[
                "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
                "nov.", "déc.",
            ],
        }
    }

    /// Day names, starting on Sunday.
    pub fn weekdays(&self) -> &'static [&'static str; 7] {
        match self {
            Self::En => &[
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ],
            Self::Fr => &[
                "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
            ],
        }
    }

    pub fn weekdays_short(&self) -> &'static [&'static str; 7] {
        match self {
            Self::En => &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Self::Fr => &["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
        }
    }

    pub fn weekdays_min(&self) -> &'static [&'static str; 7] {
        match self {
            Self::En => &["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            Self::Fr => &["di", "lu", "ma", "me", "je", "ve", "sa"],
        }
    }

    pub fn ordinal(&self, n: u32) -> String {
        match self {
            Self::En => {
                let suffix = match (n % 10, n % 100) {
                    (_, 11..=13) => "th",
                    (1, _) => "st",
                    (2, _) => "nd",
                    (3, _) => "rd",
                    _ => "th",
                };
                format!("{n}{suffix}")
            }
            Self::Fr if n == 1 => "1er".to_string(),
            Self::Fr => n.to_string(),
        }
    }

    pub fn meridiem(&self, hour: u32) -> &'static str {
        if hour < 12 { "AM" } else { "PM" }
    }

    /// Expansion of a localized token (`LT`, `LTS`, `L`..`LLLL`, `l`..`llll`).
    pub fn long_format(&self, token: &str) -> &'static str {
        match (self, token) {
            (Self::En, "LT") => "h:mm A",
            (Self::En, "LTS") => "h:mm:ss A",
            (Self::En, "L") => "MM/DD/YYYY",
            (Self::En, "LL") => "MMMM D, YYYY",
            (Self::En, "LLL") => "MMMM D, YYYY h:mm A",
            (Self::En, "LLLL") => "dddd, MMMM D, YYYY h:mm A",
            (Self::En, "l") => "M/D/YYYY",
            (Self::En, "ll") => "MMM D, YYYY",
            (Self::En, "lll") => "MMM D, YYYY h:mm A",
            (Self::En, "llll") => "ddd, MMM D, YYYY h:mm A",
            (Self::Fr, "LT") => "HH:mm",
            (Self::Fr, "LTS") => "HH:mm:ss",
            (Self::Fr, "L") => "DD/MM/YYYY",
            (Self::Fr, "LL") => "D MMMM YYYY",
            (Self::Fr, "LLL") => "D MMMM YYYY HH:mm",
            (Self::Fr, "LLLL") => "dddd D MMMM YYYY HH:mm",
            (Self::Fr, "l") => "D/M/YYYY",
            (Self::Fr, "ll") => "D MMM YYYY",
            (Self::Fr, "lll") => "D MMM YYYY HH:mm",
            (Self::Fr, "llll") => "ddd D MMM YYYY HH:mm",
            _ => "",
        }
    }
}
