// ABOUTME: Prompt templates for health recommendation generation
// ABOUTME: Renders the system prompt and the per-reading user prompt, plus the offline fallback text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prompt templates
//!
//! The user prompt embeds the subject's vitals and pins the output layout
//! (header line plus three labelled bullets) so the feed renders uniformly
//! whether the text came from the model or from [`fallback_advisory`].

use std::fmt::Write;

use crate::models::VitalsReading;

/// System instruction sent with every recommendation request
pub const RECOMMENDATION_SYSTEM_PROMPT: &str =
    "You are a healthcare assistant providing concise health recommendations.";

/// Render the user prompt for one reading
#[must_use]
pub fn recommendation_prompt(reading: &VitalsReading) -> String {
    let subject = &reading.subject;
    let metrics = &reading.metrics;
    let name = subject.full_name();

    let mut prompt = String::with_capacity(768);
    prompt.push_str(
        "Given the following health data of a person, generate three concise health recommendations in bullet points:\n\n",
    );
    // Writing into a String cannot fail
    let _ = writeln!(prompt, "- Name: {name}");
    let _ = writeln!(prompt, "- Age: {}", subject.age);
    let _ = writeln!(prompt, "- Sex: {}", subject.sex.as_str());
    let _ = writeln!(prompt, "- Heart Rate: {} BPM", metrics.heart_rate);
    let _ = writeln!(prompt, "- Fitness Level: {}", metrics.fitness_level.as_str());
    let _ = writeln!(prompt, "- Blood Pressure: {}", metrics.blood_pressure);
    let _ = writeln!(prompt, "- Steps Taken: {}", metrics.steps_taken);
    prompt.push_str("\nFormat the response as follows:\n\n");
    let _ = writeln!(prompt, "🔹 **Health Recommendations for {name}**\n");
    prompt.push_str(
        "- 🚶‍♀️ **Boost Activity**: (Brief recommendation about steps/exercise).\n\
         - ❤️ **Stay Consistent**: (Encouragement for maintaining heart rate & BP).\n\
         - 🔍 **Monitor Regularly**: (General advice on monitoring vitals).",
    );
    prompt
}

/// Generic advisory used whenever the upstream model is unavailable
#[must_use]
pub fn fallback_advisory(first_name: &str, last_name: &str) -> String {
    format!(
        "🔹 **Health Recommendations for {first_name} {last_name}**  \n\
         \n\
         - 🚶‍♀️ **Boost Activity**: Aim for 7,500+ steps daily for better endurance and metabolism.  \n\
         - ❤️ **Stay Consistent**: Maintain heart rate and blood pressure with regular movement.  \n\
         - 🔍 **Monitor Regularly**: No concerns detected, but routine check-ups are encouraged."
    )
}
