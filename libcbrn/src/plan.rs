//! Filesystem-free planning: calibrate, classify, then number.
//!
//! Classification has no cross-page dependency and runs in parallel. The
//! numbering pass is a sequential fold, since every page's number depends on
//! the slots consumed by all pages before it.

use crate::baseline::{calibrate, Baseline};
use crate::classify::classify;
use crate::config::RenumberConfig;
use crate::error::{NumberOverflow, PlanError};
use crate::length::{slot_count, total_length};
use crate::numbering::{number, pad_width};
use crate::page::{NumberedPage, Page, PageInput};
use crate::report::Warning;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePlan {
    pub title: String,
    pub baseline: Baseline,
    pub total_length: u32,
    pub pad_width: usize,
    pub pages: Vec<NumberedPage>,
    pub warnings: Vec<Warning>,
}

pub fn classify_pages(inputs: &[PageInput], baseline: &Baseline, config: &RenumberConfig) -> Vec<Page> {
    inputs
        .par_iter()
        .enumerate()
        .map(|(index, input)| {
            let ratio = input.size.ratio();
            let layout = classify(input.size, ratio, baseline, config.tolerance);
            Page {
                index,
                file_name: input.file_name.clone(),
                extension: input.extension.clone(),
                size: input.size,
                ratio,
                layout,
                slot_count: slot_count(index, layout, ratio, baseline, config.slot_rounding),
            }
        })
        .collect()
}

pub fn target_name(title: &str, number: &str, extension: &str) -> String {
    format!("{title} - {number}.{extension}")
}

/// The sequential numbering fold. Fails instead of wrapping when a number
/// would pass `u32::MAX`.
pub fn number_pages(
    title: &str,
    pages: Vec<Page>,
    first_number: u32,
) -> Result<Vec<NumberedPage>, NumberOverflow> {
    let total = total_length(&pages).ok_or(NumberOverflow)?;
    // `None` once the cursor has run past `u32::MAX`; only an error if
    // another page still needs a number.
    let mut cursor = Some(first_number);
    let mut numbered = Vec::with_capacity(pages.len());
    for page in pages {
        let start = cursor.ok_or(NumberOverflow)?;
        let page_number = number(start, page.slot_count, total).ok_or(NumberOverflow)?;
        cursor = start.checked_add(page.slot_count);
        numbered.push(NumberedPage {
            target_name: target_name(title, &page_number, &page.extension),
            number: page_number,
            page,
        });
    }
    Ok(numbered)
}

/// Irregular pages are flagged for review; an irregular last page is
/// usually a tag or back-matter page.
pub fn page_warnings(title: &str, pages: &[NumberedPage]) -> Vec<Warning> {
    let last = pages.len().saturating_sub(1);
    let mut warnings = Vec::new();
    for (position, numbered) in pages.iter().enumerate() {
        if !numbered.page.layout.is_irregular() {
            continue;
        }
        warnings.push(Warning::IrregularRatio {
            file: numbered.target_name.clone(),
            ratio: numbered.page.ratio,
            layout: numbered.page.layout,
        });
        if position == last {
            warnings.push(Warning::PossibleTag {
                issue: title.to_string(),
                file: numbered.target_name.clone(),
            });
        }
    }
    warnings
}

/// Plans an issue from page sizes alone. Pages without pixels are not
/// pages: they are left out and reported as non-images.
pub fn plan_issue(
    title: &str,
    inputs: &[PageInput],
    config: &RenumberConfig,
) -> Result<IssuePlan, PlanError> {
    let (inputs, empty): (Vec<PageInput>, Vec<PageInput>) = inputs
        .iter()
        .cloned()
        .partition(|input| !input.size.is_empty());

    let baseline = calibrate(inputs.iter().map(|input| &input.size))?;
    let pages = classify_pages(&inputs, &baseline, config);
    let total_length = total_length(&pages).ok_or(NumberOverflow)?;
    let pages = number_pages(title, pages, config.first_number)?;

    let mut warnings: Vec<Warning> = empty
        .into_iter()
        .map(|input| Warning::NonImage {
            file: input.file_name,
        })
        .collect();
    warnings.extend(page_warnings(title, &pages));
    Ok(IssuePlan {
        title: title.to_string(),
        baseline,
        total_length,
        pad_width: pad_width(total_length),
        pages,
        warnings,
    })
}
