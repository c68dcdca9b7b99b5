//! Prompt builder: instruction template + few-shot examples + selection.
//!
//! The selection is inserted verbatim. Nothing is escaped, so a selection
//! containing one of the label lines is passed through as-is.

use crate::command::CommandProfile;
use crate::constants::CODE_LABEL;

pub const COMMENT_TEMPLATE: &str = "\
A good code comment explains intent without restating obvious code. It clarifies
\"why,\" highlights hidden logic, and explains magic values or non-obvious behavior.
Write a comment for the following code within one sentence. Below are examples of
high-quality comments.

Here is the code:
print(f\" \\033[33m {msg}\\033[00m\", file=sys.stderr)
Here is a good comment:
Use terminal codes to print color output to console.

Here is the code:
to_delete = set(data.keys()) - frozenset(keep)
for key in to_delete:
  del data[key]
Here is a good comment:
Modify `data` to remove any entry not specified in the `keep` list.

Here is the code:
lines[text_range.start_line - 1:text_range.end_line - 1] = [repl.new_content]
Here is a good comment:
Replace text from `lines` with `new_content`, noting that array indices
are offset 1 from line numbers.

Here is the code:
api_key = os.getenv(\"GOOGLE_API_KEY\")
Here is a good comment:
Attempt to load the API key from the environment.";

pub const REVIEW_TEMPLATE: &str = "\
Review the following code. Identify critical bugs (e.g., syntax errors, crashes,
performance issues) and suggest improvements (e.g., reducing complexity, removing
duplicates, improving readability). Limit each point to two sentences or less,
focusing on meaningful issues.

Here is the code:
for i in x:
    pint(f\"Iteration {i} provides this {x**2}.\")
Here is the review:
The command `print` is spelled incorrectly.

Here is the code:
height = [1, 2, 3, 4, 5]
w = [6, 7, 8, 9, 10]
Here is the review:
The variable name `w` seems vague. Did you mean `width` or `weight`?

Here is the code:
while i < 0:
  thrice = i * 3
  thrice = i * 3
  twice = i * 2
Here is the review:
There are duplicate lines of code in this control structure.

Here is the code:
const fixed_value = 128;
Here is the review:
Make sure constant names are in all capitals (FIXED_VALUE) for clarity.";

pub const SUMMARY_TEMPLATE: &str = "\
Summarize the following code within three sentences. The summary should clearly
and concisely state its purpose, functionality, and critical logic or features
needed to understand it.";

/// Assemble the request text for one command invocation.
pub fn build_prompt(profile: &CommandProfile, selected: &str) -> String {
    let mut prompt = String::with_capacity(
        profile.prompt_template.len() + selected.len() + 64,
    );
    prompt.push_str(profile.prompt_template);
    prompt.push_str("\n\n");
    prompt.push_str(CODE_LABEL);
    prompt.push('\n');
    prompt.push_str(selected);
    prompt.push('\n');
    if let Some(label) = profile.answer_label {
        prompt.push_str(label);
        prompt.push('\n');
    }
    prompt
}
