//! Prompt text for every backend call the story pipeline makes.

use crate::{Evaluation, NarrativeState, RewriteKind, SegmentMode};

const AUDIENCE: &str = "children aged 5 to 10";

/// Prompt asking for a new segment.
pub(crate) fn segment_prompt(
    state: &NarrativeState,
    mode: SegmentMode,
    steering: Option<&str>,
) -> String {
    match mode {
        SegmentMode::Initial => initial_prompt(steering.unwrap_or("a gentle adventure")),
        SegmentMode::Continuation => continuation_prompt(state, steering),
        SegmentMode::Ending => ending_prompt(state),
    }
}

fn initial_prompt(request: &str) -> String {
    format!(
        "You write warm, safe stories for {AUDIENCE}.\n\n\
         Story request: {request}\n\n\
         Write the opening of the story in 200 to 400 words. It should:\n\
         - use short sentences and simple words\n\
         - introduce one or two main characters with easy names\n\
         - set up a friendly problem or small adventure\n\
         - take place somewhere welcoming\n\
         - stop at a natural pause so the story can go on\n\
         - model kindness, curiosity and friendship\n\n\
         Reply with plain story text, or with JSON: {{\"story\": \"...\"}}"
    )
}

fn continuation_prompt(state: &NarrativeState, suggestion: Option<&str>) -> String {
    let suggestion = suggestion
        .map(|s| format!("\nThe reader would like this to happen next: {s}\n"))
        .unwrap_or_default();
    format!(
        "Continue this story for {AUDIENCE}.\n\n\
         STORY SO FAR:\n{transcript}\n\n\
         CHARACTERS: {characters}\n\
         SETTING: {setting}\n\
         THEME: {theme}\n\
         {suggestion}\n\
         Write the next part in 200 to 400 words. Keep every character and the \
         setting consistent, move the plot forward gently, keep the same warm tone, \
         and stop at a point where the story could go on or end. Work the reader's \
         idea in naturally if there is one.\n\n\
         Reply with plain story text, or with JSON: {{\"story\": \"...\"}}",
        transcript = state.transcript(),
        characters = state.character_list_or("keep the characters already in the story"),
        setting = state.setting(),
        theme = state.theme(),
    )
}

fn ending_prompt(state: &NarrativeState) -> String {
    format!(
        "Write the ending of this story for {AUDIENCE}.\n\n\
         FULL STORY:\n{transcript}\n\n\
         CHARACTERS: {characters}\n\
         SETTING: {setting}\n\
         THEME: {theme}\n\n\
         In 150 to 300 words, resolve the adventure happily, show what the \
         characters learned, and finish on a warm note.\n\n\
         Reply with plain story text, or with JSON: {{\"story\": \"...\"}}",
        transcript = state.transcript(),
        characters = state.character_list_or("the characters above"),
        setting = state.setting(),
        theme = state.theme(),
    )
}

/// Prompt asking the judge to score a candidate.
pub(crate) fn evaluation_prompt(state: &NarrativeState, candidate: &str) -> String {
    format!(
        "You review story content for {AUDIENCE}.\n\n\
         SEGMENT TO REVIEW:\n{candidate}\n\n\
         STORY SO FAR:\n{transcript}\n\n\
         CHARACTERS: {characters}\n\n\
         Check, in order:\n\
         1. Safety: no violence, frightening scenes, unkind language, dangerous \
         activities or mature themes.\n\
         2. Age fit: vocabulary, ideas and emotions suit the age range.\n\
         3. Values: characters behave well and problems are solved constructively.\n\
         4. Quality: the segment is coherent, engaging and consistent with the story.\n\n\
         Respond with JSON only, in exactly this shape:\n\
         {{\n  \"verdict\": \"SAFE\" or \"UNSAFE\",\n  \"quality_score\": 1-5,\n  \
         \"concerns\": [\"...\"],\n  \"suggestions\": [\"...\"],\n  \
         \"confidence\": 1.0-5.0,\n  \"reasoning\": \"one sentence\"\n}}",
        transcript = state.transcript(),
        characters = state.character_list_or("none yet"),
    )
}

/// Prompt asking for a revised candidate after a rejection.
pub(crate) fn revision_prompt(
    state: &NarrativeState,
    candidate: &str,
    evaluation: &Evaluation,
) -> String {
    let concerns = if evaluation.concerns().is_empty() {
        "General quality improvements needed".to_string()
    } else {
        evaluation.concerns().join("; ")
    };
    let suggestions = if evaluation.suggestions().is_empty() {
        "Make it more engaging and age-appropriate".to_string()
    } else {
        evaluation.suggestions().join("; ")
    };
    format!(
        "Revise this story segment for {AUDIENCE}.\n\n\
         SEGMENT:\n{candidate}\n\n\
         PROBLEMS FOUND:\n{concerns}\n\n\
         SUGGESTED FIXES:\n{suggestions}\n\n\
         STORY SO FAR:\n{transcript}\n\n\
         Fix every problem while keeping the flow, the characters and a safe, \
         cheerful tone.\n\n\
         Reply with plain story text, or with JSON: {{\"story\": \"...\"}}",
        transcript = state.transcript(),
    )
}

/// Prompt asking for characters, setting and theme of an opening segment.
pub(crate) fn metadata_prompt(segment: &str) -> String {
    format!(
        "Read this story opening:\n\n{segment}\n\n\
         Name the main characters, the setting and the theme. Respond with JSON \
         only, in exactly this shape:\n\
         {{\n  \"characters\": [\"name\", \"name\"],\n  \
         \"setting\": \"short description of the place\",\n  \
         \"theme\": \"one word such as Adventure, Friendship or Learning\"\n}}"
    )
}

/// Prompt asking for a whole-story rewrite.
pub(crate) fn rewrite_prompt(state: &NarrativeState, kind: RewriteKind, request: &str) -> String {
    let (heading, instructions) = match kind {
        RewriteKind::ChangeRequest => (
            "CHANGE REQUEST",
            "Rework the story to include the requested changes. Keep the existing \
             characters and their personalities, and rewrite whatever parts need it.",
        ),
        RewriteKind::Tone => (
            "NEW TONE OR STYLE",
            "Retell the story in the requested tone or style. Keep the same \
             characters and plot.",
        ),
        RewriteKind::Character => (
            "NEW CHARACTER",
            "Bring the new character into the story naturally so they fit alongside \
             the existing characters and plot.",
        ),
        RewriteKind::Setting => (
            "NEW SETTING",
            "Move the story to the new setting. Keep every character and adapt the \
             plot so the change feels natural and exciting.",
        ),
    };
    format!(
        "A reader wants to change this story for {AUDIENCE}.\n\n\
         CURRENT STORY:\n{transcript}\n\n\
         {heading}:\n{request}\n\n\
         CHARACTERS: {characters}\n\
         SETTING: {setting}\n\
         THEME: {theme}\n\n\
         {instructions} The result must stay age-appropriate, positive and safe.\n\n\
         Return only the complete rewritten story.",
        transcript = state.transcript(),
        characters = state.character_list_or("none named"),
        setting = state.setting(),
        theme = state.theme(),
    )
}
