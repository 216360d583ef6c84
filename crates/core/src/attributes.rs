//! Coercion of attribute strings into the typed values handlers pass on.

use crate::error::InterpretError;
use crate::registry::TagData;
use log::debug;
use xmlpdf_markup::Element;
use xmlpdf_types::{DocumentOptions, Orientation, PageSize};

fn parse_number(tag: &str, attribute: &str, value: &str) -> Result<f32, InterpretError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| InterpretError::invalid_attribute(tag, attribute, value, "expected a number"))
}

/// Parses `value` as a finite number greater than zero.
pub fn positive_number(tag: &str, attribute: &str, value: &str) -> Result<f32, InterpretError> {
    let number = parse_number(tag, attribute, value)?;
    if number > 0.0 {
        Ok(number)
    } else {
        Err(InterpretError::invalid_attribute(tag, attribute, value, "must be greater than zero"))
    }
}

pub fn non_negative_number(tag: &str, attribute: &str, value: &str) -> Result<f32, InterpretError> {
    let number = parse_number(tag, attribute, value)?;
    if number >= 0.0 {
        Ok(number)
    } else {
        Err(InterpretError::invalid_attribute(tag, attribute, value, "must not be negative"))
    }
}

/// The positive number stored under `attribute`, or `None` when absent.
pub fn optional_positive(tag: &TagData<'_>, attribute: &str) -> Result<Option<f32>, InterpretError> {
    tag.attribute(attribute)
        .map(|value| positive_number(tag.name, attribute, value))
        .transpose()
}

/// Resolves the root element's attributes into session construction options.
pub fn document_options(root: &Element) -> Result<DocumentOptions, InterpretError> {
    let tag = root.name();
    let mut options = DocumentOptions::default();
    let mut margin_attr = None;
    let mut size_attr = None;
    for (name, value) in root.attributes().iter() {
        match name {
            "size" => {
                size_attr = Some(value);
                options.size = PageSize::parse(value)
                    .map_err(|reason| InterpretError::invalid_attribute(tag, name, value, reason))?;
            }
            "layout" => {
                options.orientation = Orientation::parse(value)
                    .map_err(|reason| InterpretError::invalid_attribute(tag, name, value, reason))?;
            }
            "margin" => {
                options.margin = non_negative_number(tag, name, value)?;
                margin_attr = Some(value);
            }
            "font" => options.font = value.to_string(),
            "fontSize" => options.font_size = positive_number(tag, name, value)?,
            "title" => options.info.title = Some(value.to_string()),
            "author" => options.info.author = Some(value.to_string()),
            "subject" => options.info.subject = Some(value.to_string()),
            "keywords" => options.info.keywords = Some(value.to_string()),
            "creator" => options.info.creator = Some(value.to_string()),
            "producer" => options.info.producer = Some(value.to_string()),
            other => debug!("Ignoring unknown document attribute '{}'", other),
        }
    }

    let page = options.page_dimensions();
    let shortest = page.width.min(page.height);
    if options.margin * 2.0 >= shortest {
        let reason = format!("margins of {}pt leave no room on a {}x{}pt page", options.margin, page.width, page.height);
        // Blame whichever of the two the document actually set, margin first.
        let (attribute, value) = match (margin_attr, size_attr) {
            (Some(value), _) => ("margin", value.to_string()),
            (None, Some(value)) => ("size", value.to_string()),
            (None, None) => ("margin", options.margin.to_string()),
        };
        return Err(InterpretError::invalid_attribute(tag, attribute, &value, reason));
    }
    Ok(options)
}
