//! Localised text used on the generated CV.
//!
//! The portal serves Spanish-speaking job seekers first, so Spanish is the
//! default; English is available for applications abroad.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug, Default)]
pub enum Locale {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "es")]
    Spanish,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "English"),
            Locale::Spanish => write!(f, "Español"),
        }
    }
}

impl Locale {
    pub fn all() -> &'static [Locale] {
        &[Locale::Spanish, Locale::English]
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::English => &ENGLISH,
            Locale::Spanish => &SPANISH,
        }
    }
}

pub struct Labels {
    pub personal_info: &'static str,
    pub location: &'static str,
    pub presentation: &'static str,
    pub education: &'static str,
    pub experience: &'static str,
    pub courses: &'static str,
    pub languages: &'static str,
    pub skills: &'static str,
    pub competencies: &'static str,
    pub social_links: &'static str,
    pub references: &'static str,

    pub name: &'static str,
    pub national_id: &'static str,
    pub birth_date: &'static str,
    pub gender: &'static str,
    pub marital_status: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub province: &'static str,
    pub canton: &'static str,

    pub institution: &'static str,
    pub level: &'static str,
    pub field: &'static str,
    pub period: &'static str,
    pub position: &'static str,
    pub area: &'static str,
    pub responsibilities: &'static str,
    pub reference: &'static str,
    pub hours: &'static str,
    pub date: &'static str,
    pub relationship: &'static str,

    /// Stands in for a missing end date
    pub present: &'static str,
    pub months: [&'static str; 12],
}

impl Labels {
    /// Labels whose values are dates and get normalised to `dd-MM-yyyy`.
    pub fn date_fields(&self) -> [&'static str; 2] {
        [self.birth_date, self.date]
    }

    /// `MMM-yyyy`, as used for record periods.
    pub fn month_year(&self, date: NaiveDate) -> String {
        format!("{}-{}", self.months[date.month0() as usize], date.year())
    }

    /// `"Mar-2019 - Present"`, tolerating unparsable dates by echoing them.
    pub fn period(&self, start: &str, end: Option<&str>) -> String {
        let format = |raw: &str| match crate::profile::dates::parse(raw) {
            Some(date) => self.month_year(date),
            None => {
                log::warn!("Unparsable record date `{raw}`, rendering verbatim");
                raw.trim().to_string()
            }
        };

        let end = match end {
            Some(end) if !end.trim().is_empty() => format(end),
            _ => self.present.to_string(),
        };
        format!("{} - {}", format(start), end)
    }
}

static ENGLISH: Labels = Labels {
    personal_info: "Personal information",
    location: "Location",
    presentation: "About me",
    education: "Education",
    experience: "Work experience",
    courses: "Courses and certificates",
    languages: "Languages",
    skills: "Skills",
    competencies: "Competencies",
    social_links: "Social links",
    references: "References",
    name: "Name",
    national_id: "ID",
    birth_date: "Birth date",
    gender: "Gender",
    marital_status: "Marital status",
    phone: "Phone",
    email: "Email",
    province: "Province",
    canton: "Canton",
    institution: "Institution",
    level: "Level",
    field: "Field",
    period: "Period",
    position: "Position",
    area: "Area",
    responsibilities: "Responsibilities",
    reference: "Reference",
    hours: "Hours",
    date: "Date",
    relationship: "Relationship",
    present: "Present",
    months: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
};

static SPANISH: Labels = Labels {
    personal_info: "Información personal",
    location: "Ubicación",
    presentation: "Presentación",
    education: "Formación académica",
    experience: "Experiencia laboral",
    courses: "Cursos y certificaciones",
    languages: "Idiomas",
    skills: "Habilidades",
    competencies: "Competencias",
    social_links: "Redes sociales",
    references: "Referencias",
    name: "Nombre",
    national_id: "Cédula",
    birth_date: "Fecha de nacimiento",
    gender: "Género",
    marital_status: "Estado civil",
    phone: "Teléfono",
    email: "Correo",
    province: "Provincia",
    canton: "Cantón",
    institution: "Institución",
    level: "Nivel",
    field: "Campo",
    period: "Periodo",
    position: "Cargo",
    area: "Área",
    responsibilities: "Responsabilidades",
    reference: "Referencia",
    hours: "Horas",
    date: "Fecha",
    relationship: "Relación",
    present: "Actualidad",
    months: [
        "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
    ],
};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn open_ended_period_uses_present() {
        let labels = Locale::Spanish.labels();
        assert_eq!(labels.period("2018-08-01", None), "Ago-2018 - Actualidad");
        assert_eq!(labels.period("2018-08-01", Some(" ")), "Ago-2018 - Actualidad");

        let labels = Locale::English.labels();
        assert_eq!(
            labels.period("2018-08-01T00:00:00Z", Some("2020-01-31")),
            "Aug-2018 - Jan-2020"
        );
    }

    #[test]
    fn unparsable_period_dates_are_echoed() {
        let labels = Locale::English.labels();
        assert_eq!(labels.period("summer 2015", None), "summer 2015 - Present");
    }

    #[test]
    fn can_serialize_locale() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            locale: Locale,
        }
        let toml = toml::to_string(&Wrapper {
            locale: Locale::English,
        })
        .expect("can serialize locale");
        assert_eq!(toml.trim(), r#"locale = "en""#);
    }
}
