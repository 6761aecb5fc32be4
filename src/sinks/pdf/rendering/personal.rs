//! The sections every CV has, whether or not they have content: personal
//! information, location and the presentation paragraph. Fields the profile
//! leaves blank are skipped rather than printed empty.

use super::line::write_paragraph;
use super::records::detail;
use super::section::write_section;
use crate::profile::ProfileDocument;
use crate::sinks::pdf::layout::Canvas;

pub fn personal_info(canvas: &mut Canvas, profile: &ProfileDocument) {
    let labels = canvas.config.locale.labels();
    let estimate = canvas.config.section_estimate_pt;
    write_section(canvas, labels.personal_info, estimate);

    let personal = &profile.personal;
    detail(canvas, labels.name, &profile.full_name());
    for (label, value) in [
        (labels.national_id, &personal.national_id),
        (labels.birth_date, &personal.birth_date),
        (labels.gender, &personal.gender),
        (labels.marital_status, &personal.marital_status),
        (labels.phone, &personal.phone),
        (labels.email, &personal.email),
    ] {
        if let Some(value) = value {
            detail(canvas, label, value);
        }
    }
}

pub fn location(canvas: &mut Canvas, profile: &ProfileDocument) {
    let labels = canvas.config.locale.labels();
    let estimate = canvas.config.section_estimate_pt;
    write_section(canvas, labels.location, estimate);

    let location = &profile.location;
    for (label, value) in [
        (labels.province, &location.province),
        (labels.canton, &location.canton),
    ] {
        if let Some(value) = value {
            detail(canvas, label, value);
        }
    }
}

pub fn presentation(canvas: &mut Canvas, profile: &ProfileDocument) {
    let labels = canvas.config.locale.labels();
    let estimate = canvas.config.section_estimate_pt;
    write_section(canvas, labels.presentation, estimate);

    if let Some(text) = &profile.presentation {
        write_paragraph(canvas, text);
    }
}
