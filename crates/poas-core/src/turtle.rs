//! Turtle rendering primitives
//!
//! Output is plain text in the fixed layout downstream tooling expects:
//! every individual is a `### poas:poas/<name>` comment followed by one
//! subject with its type and properties, closed by its `rdfs:label`.

use std::fmt::Write;

/// Prefix declarations opening every standalone output file
pub const PREAMBLE: &str = "@prefix : <poas:poas/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix xml: <http://www.w3.org/XML/1998/namespace> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix rdfs: <http://www.w3.org/2001/01/rdf-schema#> .

";

/// Namespace prefix used in block headers
pub const NAMESPACE: &str = "poas:poas/";

/// Continuation indent for word and dependency individuals
pub const DEFAULT_INDENT: usize = 9;

/// Object of a property line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Another individual in the default namespace (`:name`)
    Resource(String),
    /// An `xsd:string` typed literal
    StringLiteral(String),
}

impl Term {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Resource(name) => {
                out.push(':');
                out.push_str(name);
            }
            Self::StringLiteral(value) => {
                let _ = write!(out, "\"{value}\"^^xsd:string");
            }
        }
    }
}

/// A named individual ready to be rendered as a Turtle block
#[derive(Debug, Clone)]
pub struct Individual {
    name: String,
    class: Option<String>,
    properties: Vec<(String, Term)>,
    indent: usize,
}

impl Individual {
    /// Create an untyped named individual
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: None,
            properties: Vec::new(),
            indent: DEFAULT_INDENT,
        }
    }

    /// Set the ontology class (in addition to `owl:NamedIndividual`)
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the continuation indent
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Add an object property pointing at another individual
    pub fn with_reference(
        mut self,
        predicate: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.properties
            .push((predicate.into(), Term::Resource(target.into())));
        self
    }

    /// Add a string data property
    pub fn with_string(mut self, predicate: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .push((predicate.into(), Term::StringLiteral(value.into())));
        self
    }

    /// Local name of the individual
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append the rendered block to `out`
    pub fn write_to(&self, out: &mut String) {
        let pad = " ".repeat(self.indent);

        let _ = writeln!(out);
        let _ = writeln!(out, "### {NAMESPACE}{}", self.name);
        match &self.class {
            Some(class) => {
                let _ = writeln!(out, ":{} rdf:type owl:NamedIndividual ,", self.name);
                let _ = writeln!(out, "{pad}:{class} ;");
            }
            None => {
                let _ = writeln!(out, ":{} rdf:type owl:NamedIndividual ;", self.name);
            }
        }

        for (predicate, term) in &self.properties {
            out.push_str(&pad);
            out.push(':');
            out.push_str(predicate);
            out.push(' ');
            term.write_to(out);
            out.push_str(" ;\n");
        }

        let _ = writeln!(out, "{pad}rdfs:label \"{}\" .", self.name);
    }

    /// Render the block as a standalone string
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

/// Concatenate rendered blocks
pub fn render_all<'a>(individuals: impl IntoIterator<Item = &'a Individual>) -> String {
    let mut out = String::new();
    for individual in individuals {
        individual.write_to(&mut out);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
