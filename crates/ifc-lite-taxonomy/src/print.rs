// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Human-readable debug traces
//!
//! Every node prints a block whose first token is its kind name; nested
//! blocks are indented by a fixed step per tree level. The text is meant
//! for debugging and diffing only and is not a stable format.

use crate::{
    AffineTag, Collection, Colour, Face, GeomItem, Item, Kind, Matrix4, Provenance, Style,
    TrimBound, TrimmedCurve,
};
use std::fmt::{self, Write};

/// Debug trace options
#[derive(Clone, Debug)]
pub struct PrintOptions {
    /// Indentation added per tree level
    pub indent_step: usize,
    /// Print provenance descriptions
    pub show_provenance: bool,
    /// Print local transforms even when they are the identity
    pub show_identity_matrix: bool,
}

impl PrintOptions {
    /// Default options: step of 4, provenance shown, identity hidden
    pub fn new() -> Self {
        Self {
            indent_step: 4,
            show_provenance: true,
            show_identity_matrix: false,
        }
    }

    /// Everything shown
    pub fn verbose() -> Self {
        Self {
            show_identity_matrix: true,
            ..Self::new()
        }
    }

    /// No provenance text, for comparing trees from different sources
    pub fn anonymous() -> Self {
        Self {
            show_provenance: false,
            ..Self::new()
        }
    }

    /// Set the indentation step
    pub fn with_indent_step(mut self, step: usize) -> Self {
        self.indent_step = step;
        self
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl AffineTag {
    /// Name used in traces
    pub fn name(self) -> &'static str {
        match self {
            AffineTag::Identity => "identity",
            AffineTag::AffineWithoutScale => "affine_without_scale",
            AffineTag::AffineWithUniformScale => "affine_with_uniform_scale",
            AffineTag::AffineWithNonUniformScale => "affine_with_nonuniform_scale",
            AffineTag::Other => "other",
        }
    }
}

impl Item {
    /// Print this subtree with default options, starting at `indent`
    pub fn print<W: Write + ?Sized>(&self, sink: &mut W, indent: usize) -> fmt::Result {
        self.print_with(sink, indent, &PrintOptions::default())
    }

    /// Print this subtree with explicit options
    pub fn print_with<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        indent: usize,
        options: &PrintOptions,
    ) -> fmt::Result {
        Printer {
            out: sink,
            options,
            label: None,
        }
        .item(self, indent)
    }

    /// Whole trace as a string
    pub fn trace(&self, options: &PrintOptions) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.print_with(&mut out, 0, options);
        out
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f, 0)
    }
}

struct Printer<'a, W: Write + ?Sized> {
    out: &'a mut W,
    options: &'a PrintOptions,
    /// Appended to the next header line
    label: Option<String>,
}

impl<W: Write + ?Sized> Printer<'_, W> {
    fn line(&mut self, indent: usize, text: &str) -> fmt::Result {
        match self.label.take() {
            Some(label) => writeln!(self.out, "{:indent$}{} {}", "", text, label, indent = indent),
            None => writeln!(self.out, "{:indent$}{}", "", text, indent = indent),
        }
    }

    fn step(&self, indent: usize) -> usize {
        indent + self.options.indent_step
    }

    fn item(&mut self, item: &Item, indent: usize) -> fmt::Result {
        match item {
            Item::Matrix4(m) => self.matrix(m, indent),
            Item::Point3(p) => self.vector(Kind::Point3, p.components.iter(), &p.instance, indent),
            Item::Direction3(d) => {
                self.vector(Kind::Direction3, d.components.iter(), &d.instance, indent)
            }
            Item::Colour(c) => self.colour(c, indent),
            Item::Style(s) => self.style(s, indent),
            Item::Line(l) => self.geom_header(Kind::Line, "", &l.geom, indent),
            Item::Circle(c) => {
                self.geom_header(Kind::Circle, &format!(" {}", c.radius), &c.geom, indent)
            }
            Item::Ellipse(e) => self.geom_header(
                Kind::Ellipse,
                &format!(" {} {}", e.radius, e.radius2),
                &e.geom,
                indent,
            ),
            Item::BSplineCurve(b) => self.geom_header(Kind::BSplineCurve, "", &b.geom, indent),
            Item::Plane(p) => self.geom_header(Kind::Plane, "", &p.geom, indent),
            Item::TrimmedCurve(c) => self.trimmed(Kind::TrimmedCurve, c, indent),
            Item::Edge(e) => self.trimmed(Kind::Edge, e, indent),
            Item::Collection(c) => self.collection(Kind::Collection, "", c, indent),
            Item::Loop(l) => {
                let extra = format!(
                    "{}{}",
                    flag("external", l.external),
                    flag("closed", l.closed)
                );
                self.collection(Kind::Loop, &extra, l, indent)
            }
            Item::Shell(s) => self.collection(Kind::Shell, &flag("closed", s.closed), s, indent),
            Item::Face(f) => self.face(f, indent),
            Item::BooleanResult(b) => self.collection(
                Kind::BooleanResult,
                &format!(" {}", b.operation.name()),
                b,
                indent,
            ),
            Item::Node(n) => {
                self.collection(Kind::Node, "", n, indent)?;
                for (name, rep) in &n.representations {
                    self.label = Some(format!("representation={}", name));
                    self.item(rep, self.step(indent))?;
                }
                Ok(())
            }
            Item::Extrusion(e) => {
                self.geom_header(Kind::Extrusion, &format!(" {}", e.depth), &e.geom, indent)?;
                let inner = self.step(indent);
                self.vector(
                    Kind::Direction3,
                    e.direction.components.iter(),
                    &e.direction.instance,
                    inner,
                )?;
                self.face(&e.basis, inner)
            }
        }
    }

    fn provenance(&mut self, instance: &Option<Provenance>, indent: usize) -> fmt::Result {
        match instance {
            Some(p) if self.options.show_provenance => {
                self.line(self.step(indent), &format!("instance {}", p.describe()))
            }
            _ => Ok(()),
        }
    }

    fn matrix(&mut self, m: &Matrix4, indent: usize) -> fmt::Result {
        let mut text = format!("{} {}", Kind::Matrix4, m.tag.name());
        for c in m.components().iter() {
            write!(text, " {}", c)?;
        }
        self.line(indent, &text)?;
        self.provenance(&m.instance, indent)
    }

    fn vector<'v>(
        &mut self,
        kind: Kind,
        components: impl Iterator<Item = &'v f64>,
        instance: &Option<Provenance>,
        indent: usize,
    ) -> fmt::Result {
        let mut text = kind.name().to_string();
        for c in components {
            write!(text, " {}", c)?;
        }
        self.line(indent, &text)?;
        self.provenance(instance, indent)
    }

    fn colour(&mut self, c: &Colour, indent: usize) -> fmt::Result {
        self.vector(Kind::Colour, c.components.iter(), &c.instance, indent)
    }

    fn style(&mut self, s: &Style, indent: usize) -> fmt::Result {
        self.line(indent, Kind::Style.name())?;
        self.provenance(&s.instance, indent)?;

        let inner = self.step(indent);
        if let Some(name) = &s.name {
            self.line(inner, &format!("name {}", name))?;
        }
        for (label, colour) in [("diffuse", &s.diffuse), ("specular", &s.specular)] {
            if let Some(colour) = colour {
                self.line(inner, label)?;
                self.colour(colour, self.step(inner))?;
            }
        }
        if let Some(v) = s.specularity {
            self.line(inner, &format!("specularity {}", v))?;
        }
        if let Some(v) = s.transparency {
            self.line(inner, &format!("transparency {}", v))?;
        }
        Ok(())
    }

    /// Header line plus the shared transform, style and provenance
    fn geom_header(
        &mut self,
        kind: Kind,
        extra: &str,
        geom: &GeomItem,
        indent: usize,
    ) -> fmt::Result {
        self.line(
            indent,
            &format!("{}{}{}", kind, extra, flag("orientation", geom.orientation)),
        )?;
        self.provenance(&geom.instance, indent)?;

        let inner = self.step(indent);
        if self.options.show_identity_matrix || !geom.matrix.is_identity() {
            self.matrix(&geom.matrix, inner)?;
        }
        let style = &geom.surface_style;
        if !style.is_empty() || (self.options.show_provenance && style.instance.is_some()) {
            self.style(style, inner)?;
        }
        Ok(())
    }

    fn trimmed(&mut self, kind: Kind, c: &TrimmedCurve, indent: usize) -> fmt::Result {
        let sense = if c.same_sense() { "" } else { " reversed" };
        self.geom_header(kind, sense, &c.geom, indent)?;

        let inner = self.step(indent);
        if let Some(basis) = c.basis() {
            self.item(basis, inner)?;
        }
        for (label, bound) in [("start", &c.start), ("end", &c.end)] {
            self.line(inner, label)?;
            match bound {
                TrimBound::Point(p) => self.vector(
                    Kind::Point3,
                    p.components.iter(),
                    &p.instance,
                    self.step(inner),
                )?,
                TrimBound::Parameter(t) => {
                    self.line(self.step(inner), &format!("parameter {}", t))?
                }
            }
        }
        Ok(())
    }

    fn collection(
        &mut self,
        kind: Kind,
        extra: &str,
        c: &Collection,
        indent: usize,
    ) -> fmt::Result {
        self.geom_header(kind, extra, &c.geom, indent)?;
        for child in &c.children {
            self.item(child, self.step(indent))?;
        }
        Ok(())
    }

    fn face(&mut self, f: &Face, indent: usize) -> fmt::Result {
        self.geom_header(Kind::Face, "", &f.geom, indent)?;
        let inner = self.step(indent);
        if let Some(basis) = f.basis() {
            self.item(basis, inner)?;
        }
        for child in &f.children {
            self.item(child, inner)?;
        }
        Ok(())
    }
}

fn flag(name: &str, value: Option<bool>) -> String {
    value
        .map(|v| format!(" {}={}", name, v))
        .unwrap_or_default()
}
