//! Repeated-collection sections.
//!
//! Each non-empty collection gets a section header followed by one block per
//! record, in the order the profile lists them. A block is framed by light
//! grey dividers: a bold title line, then `"Label: value"` detail lines that
//! go through the line writer so labels are bolded and dates normalised.
//! Empty collections produce nothing at all, not even the header.

use super::line::{write_line, write_paragraph, write_styled};
use super::section::write_section;
use crate::profile::{
    CompetencyRecord, CourseRecord, EducationRecord, ExperienceRecord, LanguageRecord,
    PersonalReference, ProfileDocument, Responsibilities, SkillRecord, SocialLink,
};
use crate::sinks::pdf::fonts::Weight;
use crate::sinks::pdf::layout::{colours, Canvas};

const RECORD_DIVIDER_THICKNESS: f32 = 0.5;

/// Write `"label: value"` unless the value is blank.
pub(super) fn detail(canvas: &mut Canvas, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        write_line(canvas, &format!("{label}: {value}"));
    }
}

fn title(canvas: &mut Canvas, text: &str) {
    if !text.trim().is_empty() {
        write_styled(canvas, text.trim(), Weight::Bold);
    }
}

/// A divider-framed record block.
fn record_block<F: FnOnce(&mut Canvas)>(canvas: &mut Canvas, body: F) {
    let gap = canvas.config.record_gap_pt;
    let line_height = canvas.config.line_height_pt;
    // keep the opening divider with the record's first two lines
    canvas.ensure_space(gap + 2.0 * line_height);
    canvas.draw_rule(0.0, RECORD_DIVIDER_THICKNESS, colours::LIGHT_GREY);
    canvas.advance(gap);

    body(canvas);

    canvas.draw_rule(0.0, RECORD_DIVIDER_THICKNESS, colours::LIGHT_GREY);
    canvas.advance(canvas.config.record_trailing_gap_pt);
}

fn collection<T, F>(canvas: &mut Canvas, heading: &str, records: &[T], mut render_record: F)
where
    F: FnMut(&mut Canvas, &T),
{
    if records.is_empty() {
        log::debug!("Skipping empty section `{heading}`");
        return;
    }

    let estimate = canvas.config.section_estimate_pt;
    write_section(canvas, heading, estimate);
    for record in records {
        record_block(canvas, |canvas| render_record(canvas, record));
    }
}

pub fn education(canvas: &mut Canvas, records: &[EducationRecord]) {
    let labels = canvas.config.locale.labels();
    collection(canvas, labels.education, records, |canvas, record| {
        title(canvas, &record.title);
        detail(canvas, labels.institution, &record.institution);
        detail(canvas, labels.level, &record.level);
        detail(canvas, labels.field, &record.field);
        if !record.start_date.trim().is_empty() {
            let period = labels.period(&record.start_date, record.end_date.as_deref());
            detail(canvas, labels.period, &period);
        }
    });
}

fn responsibilities(canvas: &mut Canvas, responsibilities: &Responsibilities) {
    if responsibilities.is_empty() {
        return;
    }

    let line_height = canvas.config.line_height_pt;
    let base = canvas.config.responsibilities_base_pt;
    let estimate = match responsibilities {
        Responsibilities::NumberedList(items) => base + items.len() as f32 * line_height,
        Responsibilities::Paragraph(_) => base + line_height,
    };
    canvas.ensure_space(estimate.min(canvas.state.content_height()));

    let labels = canvas.config.locale.labels();
    write_styled(canvas, labels.responsibilities, Weight::Bold);
    match responsibilities {
        Responsibilities::Paragraph(text) => write_paragraph(canvas, text),
        Responsibilities::NumberedList(_) => {
            for item in responsibilities.lines() {
                write_line(canvas, &item);
            }
        }
    }
}

pub fn experience(canvas: &mut Canvas, records: &[ExperienceRecord]) {
    let labels = canvas.config.locale.labels();
    collection(canvas, labels.experience, records, |canvas, record| {
        title(canvas, &record.company);
        detail(canvas, labels.position, &record.position);
        detail(canvas, labels.area, &record.area().label);
        if !record.start_date.trim().is_empty() {
            let period = labels.period(&record.start_date, record.end_date.as_deref());
            detail(canvas, labels.period, &period);
        }
        responsibilities(canvas, &record.responsibilities());

        let reference = [&record.reference_name, &record.reference_contact]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<&str>>()
            .join(" - ");
        detail(canvas, labels.reference, &reference);
    });
}

pub fn courses(canvas: &mut Canvas, records: &[CourseRecord]) {
    let labels = canvas.config.locale.labels();
    collection(canvas, labels.courses, records, |canvas, record| {
        title(canvas, &record.name);
        detail(canvas, labels.institution, &record.institution);
        if let Some(hours) = record.hours {
            detail(canvas, labels.hours, &hours.to_string());
        }
        if let Some(date) = &record.date {
            detail(canvas, labels.date, date);
        }
    });
}

fn leveled(canvas: &mut Canvas, name: &str, level: &str) {
    let label = canvas.config.locale.labels().level;
    title(canvas, name);
    detail(canvas, label, level);
}

pub fn languages(canvas: &mut Canvas, records: &[LanguageRecord]) {
    let heading = canvas.config.locale.labels().languages;
    collection(canvas, heading, records, |canvas, record| {
        leveled(canvas, &record.name, &record.level)
    });
}

pub fn skills(canvas: &mut Canvas, records: &[SkillRecord]) {
    let heading = canvas.config.locale.labels().skills;
    collection(canvas, heading, records, |canvas, record| {
        leveled(canvas, &record.name, &record.level)
    });
}

pub fn competencies(canvas: &mut Canvas, records: &[CompetencyRecord]) {
    let heading = canvas.config.locale.labels().competencies;
    collection(canvas, heading, records, |canvas, record| {
        leveled(canvas, &record.name, &record.level)
    });
}

pub fn social_links(canvas: &mut Canvas, records: &[SocialLink]) {
    let heading = canvas.config.locale.labels().social_links;
    collection(canvas, heading, records, |canvas, link| {
        title(canvas, &link.network);
        // URLs carry a colon of their own
        write_paragraph(canvas, link.url.trim());
    });
}

pub fn references(canvas: &mut Canvas, records: &[PersonalReference]) {
    let labels = canvas.config.locale.labels();
    collection(canvas, labels.references, records, |canvas, reference| {
        title(canvas, &reference.name);
        for (label, value) in [
            (labels.relationship, &reference.relationship),
            (labels.phone, &reference.phone),
            (labels.email, &reference.email),
        ] {
            if let Some(value) = value {
                detail(canvas, label, value);
            }
        }
    });
}

/// Every collection section, in document order.
pub fn render_all(canvas: &mut Canvas, profile: &ProfileDocument, mut tick: impl FnMut(&str)) {
    let labels = canvas.config.locale.labels();
    education(canvas, profile.education());
    tick(labels.education);
    experience(canvas, profile.experience());
    tick(labels.experience);
    courses(canvas, profile.courses());
    tick(labels.courses);
    languages(canvas, profile.languages());
    tick(labels.languages);
    skills(canvas, profile.skills());
    tick(labels.skills);
    competencies(canvas, profile.competencies());
    tick(labels.competencies);
    social_links(canvas, profile.social_links());
    tick(labels.social_links);
    references(canvas, profile.references());
    tick(labels.references);
}
