//! Prompt templates for each extraction workstream
//!
//! Every prompt asks for a single JSON object whose keys match the profile
//! fields that workstream is routed to. Website content is truncated to a
//! fixed budget before interpolation so prompts stay inside provider token
//! limits regardless of how much content the caller sends.

use crate::types::WorkstreamId;
use shared::ExtractionRequest;

/// Maximum website content characters interpolated into any prompt
pub const CONTENT_BUDGET: usize = 10_000;

/// Build the full prompt for one workstream
pub fn build_prompt(id: WorkstreamId, request: &ExtractionRequest) -> String {
    let content = truncate_content(&request.website_content);
    let business = &request.business_name;
    let industry = match request.industry.trim() {
        "" => "unknown",
        other => other,
    };

    let header = format!(
        "You are analyzing the website of \"{business}\" (industry: {industry}).\n\
         Respond with ONLY a valid JSON object, no markdown, no commentary.\n"
    );

    let body = match id {
        WorkstreamId::CustomerProfile => {
            "Extract the customer profile from the website content.\n\
             Return a JSON object with exactly these keys:\n\
             - \"customer_triggers\": array of strings, events that push a customer to seek this business\n\
             - \"pain_points\": array of strings, problems customers experience before buying\n\
             - \"desired_outcomes\": array of strings, results customers want to achieve\n"
        }
        WorkstreamId::Transformations => {
            "Extract the customer transformations this business promises.\n\
             Return a JSON object with exactly these keys:\n\
             - \"transformations\": array of strings, before-to-after changes customers go through\n\
             - \"benefits\": array of strings, concrete benefits of the products or services\n"
        }
        WorkstreamId::Differentiators => {
            "Extract what this business offers and what sets it apart.\n\
             Return a JSON object with exactly these keys:\n\
             - \"products_services\": array of strings, the products and services offered\n\
             - \"differentiators\": array of strings, what distinguishes this business from competitors\n\
             - \"proof_points\": array of strings, evidence backing the claims (testimonials, numbers, credentials)\n"
        }
        WorkstreamId::Personas => {
            "Extract the buyer personas this business serves.\n\
             Return a JSON object with exactly these keys:\n\
             - \"personas\": array of objects, each with \"name\" (string), \"summary\" (string), \
               \"goals\" (array of strings), \"frustrations\" (array of strings)\n\
             - \"objections\": array of strings, reasons prospects hesitate to buy\n"
        }
        WorkstreamId::Hooks => {
            "Extract marketing language that would resonate with this business's customers.\n\
             Return a JSON object with exactly these keys:\n\
             - \"power_words\": array of strings, emotionally charged words from or fitting the website\n\
             - \"hook_library\": array of strings, short attention-grabbing opening lines for marketing copy\n"
        }
    };

    format!("{header}\n{body}\nWebsite content:\n---\n{content}\n---")
}

/// Truncate at the char boundary at or below the budget
fn truncate_content(content: &str) -> &str {
    if content.len() <= CONTENT_BUDGET {
        return content;
    }
    let mut end = CONTENT_BUDGET;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}
