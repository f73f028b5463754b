//! Tree-shaped text report

use colored::{Color, Colorize};
use std::fmt::Write;

use crate::core::analyzer::{AnalysisResult, Stats};
use crate::core::types::{BindingGrant, PermissionGrant, Rule};

const INDENT: &str = "  ";
const CLUSTER_WIDE: &str = "<cluster-wide>";

/// Renders an [`AnalysisResult`] as a human-readable tree
#[derive(Debug, Clone)]
pub struct TextFormatter {
    use_color: bool,
    out: String,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            out: String::new(),
        }
    }

    pub fn format(mut self, result: &AnalysisResult) -> String {
        self.line(self.paint("=== RBAC Permissions Analysis ===", Color::Cyan));
        self.blank();
        self.namespace_roles(result);
        self.cluster_roles(&result.cluster_roles);
        self.bindings(result);
        self.stats(&result.stats);
        if result.truncated {
            self.blank();
            self.line(self.paint(
                "Warning: result limit reached, output is incomplete (raise --limit or use -1 for no limit)",
                Color::Red,
            ));
        }
        self.out
    }

    fn namespace_roles(&mut self, result: &AnalysisResult) {
        self.line(self.paint("=== Namespace Roles ===", Color::Cyan));
        if result.namespace_roles.is_empty() {
            self.line("No namespace roles found".to_string());
        }
        for (namespace, roles) in &result.namespace_roles {
            self.line(self.paint(&format!("Namespace: {}", namespace), Color::Blue));
            for role in roles {
                self.grant(role);
            }
        }
        self.blank();
    }

    fn cluster_roles(&mut self, roles: &[PermissionGrant]) {
        self.line(self.paint("=== Cluster Roles ===", Color::Cyan));
        if roles.is_empty() {
            self.line("No cluster roles found".to_string());
        }
        for role in roles {
            self.grant(role);
        }
        self.blank();
    }

    fn bindings(&mut self, result: &AnalysisResult) {
        self.line(self.paint("=== Role Bindings ===", Color::Cyan));

        self.line(self.paint("Cluster Role Bindings:", Color::Blue));
        for binding in &result.cluster_bindings {
            self.binding(binding);
        }

        self.line(self.paint("Namespace Role Bindings:", Color::Blue));
        for (namespace, bindings) in &result.namespace_bindings {
            self.line(self.paint(&format!("Namespace: {}", namespace), Color::Green));
            for binding in bindings {
                self.binding(binding);
            }
        }
        self.blank();
    }

    fn grant(&mut self, grant: &PermissionGrant) {
        self.line(self.paint(
            &format!("{}├─ {}: {}", INDENT, grant.kind(), grant.name),
            Color::Green,
        ));
        for rule in &grant.rules {
            self.rule(rule);
        }
        self.line(format!("{}│", INDENT));
    }

    fn rule(&mut self, rule: &Rule) {
        let label = self.paint(&format!("{}│  ├─ Resources: ", INDENT), Color::Yellow);
        self.line(format!("{}{}", label, rule.resources.join(", ")));
        let label = self.paint(&format!("{}│  └─ Actions: ", INDENT), Color::Magenta);
        self.line(format!("{}{}", label, rule.verbs.join(", ")));
    }

    fn binding(&mut self, binding: &BindingGrant) {
        self.line(self.paint(
            &format!("{}├─ {}: {}", INDENT, binding.kind(), binding.name),
            Color::Green,
        ));
        let label = self.paint(&format!("{}│  ├─ References: ", INDENT), Color::Yellow);
        self.line(format!(
            "{}{}/{}",
            label, binding.role_ref.kind, binding.role_ref.name
        ));
        self.line(self.paint(&format!("{}│  └─ Subjects:", INDENT), Color::Magenta));
        for subject in &binding.subjects {
            self.line(format!(
                "{}│     ├─ {}: {} ({})",
                INDENT,
                subject.kind,
                subject.name,
                subject.namespace.as_deref().unwrap_or(CLUSTER_WIDE)
            ));
        }
        self.line(format!("{}│", INDENT));
    }

    fn stats(&mut self, stats: &Stats) {
        self.line(self.paint("=== Summary ===", Color::Cyan));
        self.line(format!("Total namespaces: {}", stats.total_namespaces));
        self.line(format!("Namespaces with roles: {}", stats.namespaces_with_roles));
        self.line(format!("Total namespace roles: {}", stats.total_roles));
        self.line(format!("Total cluster roles: {}", stats.total_cluster_roles));
        self.line(format!("Total bindings: {}", stats.total_bindings));
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: String) {
        // writing into a String cannot fail
        let _ = writeln!(self.out, "{}", text);
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}
