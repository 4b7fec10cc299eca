//! Prompt templates for the issue agent.

use crate::task::IssueTask;

/// Build the system prompt: workflow, safety rules, and the final-summary
/// contract the outcome extractor depends on.
pub fn build_system_prompt(task: &IssueTask) -> String {
    format!(
        r#"You are an autonomous coding agent with access to tools that operate on a Git repository. You ONLY interact with the repository via tools.

High-level goal:
- Address GitHub issue #{issue_number} by performing small, safe code changes.

Workflow:
1. Call clone_repo exactly once at the beginning.
2. Use find_files and read_file as needed to inspect the repository.
3. Create a new branch from the base branch using create_branch.
4. Edit files via write_file, keeping diffs small and focused on the issue.
5. Call commit_and_push once you are satisfied with the edits.
6. Call create_pr to open a pull request for that branch.

Rules:
- Never assume file contents; always read_file before writing.
- Use create_branch before committing changes.
- Use commit_and_push only once you are satisfied with the edits.
- Use create_pr as the final step, after the branch is pushed.
- If no safe, actionable change is possible, do NOT call commit_and_push or create_pr; finish with status "no_action" instead.

When you are done, respond with a short explanation followed by a JSON object on the last line with this shape:
{{"status": "pr_created" | "no_action", "branch": "...", "pr_number": <int or null>, "pr_url": "... or null"}}
The final message MUST end with that JSON object on its own line, with no text after it."#,
        issue_number = task.issue_number
    )
}

/// Render the issue itself as the opening user message.
pub fn build_user_prompt(task: &IssueTask) -> String {
    let labels = if task.labels.is_empty() {
        "(none)".to_string()
    } else {
        task.labels.join(", ")
    };

    format!(
        "Repository URL: {repo_url}\n\
         Base branch: {base_branch}\n\
         Issue #{issue_number}: {title}\n\
         Issue body:\n{body}\n\n\
         Labels: {labels}\n\n\
         Decide whether a small, automated code change is appropriate. If yes, use the tools to \
         clone the repository, explore it, create a new branch from the base branch, edit files, \
         commit and push, and open a pull request. If not, respond with status \"no_action\" in \
         the final JSON.",
        repo_url = task.repo_url,
        base_branch = task.base_branch,
        issue_number = task.issue_number,
        title = task.title,
        body = task.body,
        labels = labels,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::IssueTask;

    fn task() -> IssueTask {
        IssueTask {
            repo_url: "https://github.com/acme/widgets".to_string(),
            base_branch: "main".to_string(),
            issue_number: 12,
            title: "Widgets are upside down".to_string(),
            body: "Flip them.".to_string(),
            labels: vec!["bug".to_string()],
        }
    }

    #[test]
    fn system_prompt_names_the_issue_and_the_contract() {
        let prompt = build_system_prompt(&task());
        assert!(prompt.contains("issue #12"));
        assert!(prompt.contains("\"pr_created\" | \"no_action\""));
    }

    #[test]
    fn user_prompt_renders_the_task_fields() {
        let prompt = build_user_prompt(&task());
        assert!(prompt.contains("Repository URL: https://github.com/acme/widgets"));
        assert!(prompt.contains("Issue #12: Widgets are upside down"));
        assert!(prompt.contains("Labels: bug"));
    }

    #[test]
    fn user_prompt_handles_empty_labels() {
        let mut task = task();
        task.labels.clear();
        assert!(build_user_prompt(&task).contains("Labels: (none)"));
    }
}
