//! Rule listing, hand edits and the generated program text.

use color_eyre::eyre::bail;
use color_eyre::Result;
use lexlogic_core::client::{FragmentApi, RuleApi};
use lexlogic_core::color::rule_color;
use lexlogic_core::logic::{parse_clause, split_clause, split_literals, Literal};
use lexlogic_core::models::{CreateRule, FragmentId, Rule, RuleId, UpdateRule};

use crate::output::{dimmed, heading, print_info, print_success, swatch};

pub async fn list<B: RuleApi>(backend: &B, fragment: FragmentId) -> Result<()> {
    let rules = backend.list_rules(fragment).await?;
    if rules.is_empty() {
        print_info("No rules generated yet");
        return Ok(());
    }

    for rule in &rules {
        for line in layout(rule) {
            println!("{}", line);
        }
        println!();
    }
    Ok(())
}

/// Lines for one rule: description, head, then one body literal per line.
fn layout(rule: &Rule) -> Vec<String> {
    let mut title = format!("{} #{}", swatch(rule_color(rule.id).hover), rule.id);
    if rule.is_goal {
        title.push_str(" [goal]");
    }
    if !rule.description.is_empty() {
        title.push(' ');
        title.push_str(&dimmed(&rule.description).to_string());
    }

    let mut lines = vec![title];
    match split_clause(&rule.definition) {
        Ok((head, tail)) => {
            lines.push(format!("  {} :-", heading(head)));
            lines.extend(split_literals(tail).iter().map(literal_line));
        }
        Err(_) => lines.push(format!("  {}", heading(rule.definition.trim()))),
    }
    lines
}

fn literal_line(literal: &Literal) -> String {
    match literal.separator {
        Some(';') => format!("      {} ;", literal.text),
        Some(separator) => format!("      {}{}", literal.text, separator),
        None => format!("      {}.", literal.text),
    }
}

pub async fn program<B: FragmentApi>(backend: &B, fragment: FragmentId) -> Result<()> {
    let text = backend.formalism_text(fragment).await?;
    println!("{}", text.trim_end());
    Ok(())
}

pub async fn add<B: RuleApi>(
    backend: &B,
    fragment: FragmentId,
    definition: String,
    description: String,
    is_goal: bool,
) -> Result<()> {
    let definition = checked_definition(&definition)?;
    let rule = backend
        .create_rule(&CreateRule {
            regulation_fragment_id: fragment,
            description: description.trim().to_string(),
            definition,
            is_goal,
        })
        .await?;

    print_success(&format!("Added rule {}", rule.id));
    print_rule(&rule);
    Ok(())
}

pub async fn edit<B: RuleApi>(backend: &B, id: RuleId, update: UpdateRule) -> Result<()> {
    if update.definition.is_none() && update.description.is_none() && update.is_goal.is_none() {
        bail!("Nothing to change: pass --definition, --description or --goal");
    }
    let update = UpdateRule {
        definition: update
            .definition
            .as_deref()
            .map(checked_definition)
            .transpose()?,
        ..update
    };

    let rule = backend.update_rule(id, &update).await?;
    print_success(&format!("Updated rule {}", rule.id));
    print_rule(&rule);
    Ok(())
}

pub async fn delete<B: RuleApi>(backend: &B, id: RuleId) -> Result<()> {
    backend.delete_rule(id).await?;
    print_success(&format!("Deleted rule {}", id));
    Ok(())
}

/// Trimmed definition with a closing `.`, rejected when it does not parse
/// as a clause.
fn checked_definition(definition: &str) -> Result<String> {
    let mut definition = definition.trim().to_string();
    if !definition.ends_with('.') {
        definition.push('.');
    }
    parse_clause(&definition)?;
    Ok(definition)
}

fn print_rule(rule: &Rule) {
    for line in layout(rule) {
        println!("{}", line);
    }
}
