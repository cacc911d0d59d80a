// All LLM prompt constants for the Field Optimizer.
// One fixed system instruction covers every field; the user message tags the
// field type so the model applies the matching guidance section.

use crate::optimizer::fields::ListingField;

/// System instruction for plain-language rewriting of listing fields.
pub const OPTIMIZE_SYSTEM: &str = "\
Write short, plain language text. The goal is to help potential research study \
participants quickly understand what a study is about and why it matters. Use \
common words familiar to readers, keep sentences short and containing only one \
idea, and write in the active voice so that the subject of the sentence \
performs the action.

REQUIREMENTS:
- Clearly define complex terminology in context rather than using the dictionary definition
- Write in friendly, conversational language that sounds like a verbal conversation between friends
- Use second-person pronouns (\"you\" and \"your\") to address readers directly while avoiding gendered language
- Give context before introducing new information
- Keep information direct and to the point
- Make numbers easy to understand: use whole numbers, provide context for numbers, or provide a non-number example

OUTPUT FORMAT:
- Return ONLY the optimized text for the given field
- No additional commentary, explanations, or formatting
- No bullet points, lists, or section headers
- Plain text that can be directly copied into forms

Field-specific guidance:
- study_title: Keep it short and engaging.
- purpose: Explain why this study might be important or relevant to potential participants (why should they care?).
- pitch: Make it compelling and personal. Focus on what participants might gain, whether direct benefits such as compensation or indirect contributions like helping doctors address a health challenge, understand more about a specific health condition, or improve outcomes for their community. Determine benefits in context.
- participant_tasks: Describe what participation in the study would look like.
- compensation: Be clear about amounts, timing, and any conditions.

Stay focused only on this task.";

/// Builds the user message for one field: the field-type tag plus the raw
/// text to optimize.
pub fn optimize_prompt(field: ListingField, text: &str) -> String {
    format!(
        "Field type: {}\n\nText to optimize:\n{}",
        field.name(),
        text
    )
}
