//! Extracting schema definitions from the OID Directory draft series.
//!
//! Revisions of `draft-coretta-oiddir-schema` carry their LDAP schema
//! definitions inline, as indented, parenthesized blocks below the OID
//! prefix `1.3.6.1.4.1.56521.101.2`. This module scans the text of such a
//! revision, classifies every definition it finds by the arc following
//! that prefix, and re-renders the lot as a schema listing for one of
//! three directory server dialects.
//!
//! The entry point is [`extract`] which produces a [`Report`]. Callers
//! that want the categorized definitions without the rendered listing can
//! use [`Extraction::scan`] directly.
//!
//! Note that in the case of 389DS, server version 1.4.3 or later is
//! required due to the use of the UUID syntax and the matching rules of
//! RFC 4530.
//!
//! [`extract`]: fn.extract.html
//! [`Report`]: struct.Report.html
//! [`Extraction::scan`]: struct.Extraction.html#method.scan

use std::{error, fmt};
use std::fmt::Write;
use std::borrow::Cow;
use std::str::FromStr;
use regex::Regex;


//------------ Constants -----------------------------------------------------

/// The pattern bounding a single schema definition.
///
/// A definition is preceded by a blank line and opens with at least six
/// spaces, a parenthesis, a space, and the official OID prefix. It runs,
/// possibly across lines, up to the first closing parenthesis that sits at
/// the end of a line followed by a blank line. The trailing blank line is
/// asserted but not consumed, so it may open the next definition.
///
/// The arc after the prefix is captured as any digit sequence rather than
/// the four arcs the I-D series actually assigns. Definitions below an
/// unassigned arc must surface in the report as unknown elements, which
/// requires matching them in the first place.
const DEFINITION_PATTERN: &str =
    r"(?m)^$\n^( {6,}\( 1\.3\.6\.1\.4\.1\.56521\.101\.2\.(\d+)\.\d+(?s:.+?)\))\n$";

/// The extension tag marking where an emitted definition came from.
///
/// Includes the closing parenthesis of the definition it is appended to.
const X_ORIGIN: &str = "X-ORIGIN 'draft-coretta-oiddir-schema' )";

/// Continuation lines within a definition are indented ten spaces.
const INDENT: &str = "          ";

/// Attribute types whose I-D syntax is supplanted by a custom syntax.
///
/// Keys are attribute type OIDs, values the custom syntax OID imposed on
/// them under the OpenDJ dialect when custom syntaxes are enabled. Some
/// syntaxes serve more than one attribute type.
const SYNTAX_REPLACEMENTS: &[(&str, &str)] = &[
    ("1.3.6.1.4.1.56521.101.2.3.3", "1.3.6.1.4.1.56521.101.2.1.3"),
    ("1.3.6.1.4.1.56521.101.2.3.4", "1.3.6.1.4.1.56521.101.2.1.4"),
    ("1.3.6.1.4.1.56521.101.2.3.5", "1.3.6.1.4.1.56521.101.2.1.5"),
    ("1.3.6.1.4.1.56521.101.2.3.6", "1.3.6.1.4.1.56521.101.2.1.5"),
    ("1.3.6.1.4.1.56521.101.2.3.7", "1.3.6.1.4.1.56521.101.2.1.7"),
    ("1.3.6.1.4.1.56521.101.2.3.8", "1.3.6.1.4.1.56521.101.2.1.7"),
    ("1.3.6.1.4.1.56521.101.2.3.18", "1.3.6.1.4.1.56521.101.2.1.18"),
    ("1.3.6.1.4.1.56521.101.2.3.19", "1.3.6.1.4.1.56521.101.2.1.19"),
    ("1.3.6.1.4.1.56521.101.2.3.20", "1.3.6.1.4.1.56521.101.2.1.20"),
];

/// Returns the custom syntax imposed on the given attribute type, if any.
fn syntax_replacement(oid: &str) -> Option<&'static str> {
    SYNTAX_REPLACEMENTS.iter().find(|item| item.0 == oid).map(|item| item.1)
}


//------------ Dialect -------------------------------------------------------

/// The directory server dialect a listing is rendered for.
///
/// Each dialect carries its own keyword labels and feature support. Name
/// forms are only honored by OpenDJ; under the other two dialects they are
/// still listed, but commented out. Custom syntaxes are an OpenDJ-only
/// concept as well.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dialect {
    /// OpenLDAP `slapd.conf`-style schema directives.
    OpenLdap,

    /// 389 Directory Server. Requires server version 1.4.3 or later.
    Ds389,

    /// OpenDJ subschema subentry LDIF.
    OpenDj,
}

impl Dialect {
    /// Returns the lowercase name of the dialect.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::OpenLdap => "openldap",
            Dialect::Ds389 => "389ds",
            Dialect::OpenDj => "opendj",
        }
    }

    /// Returns whether the dialect honors name form definitions.
    pub fn supports_name_forms(self) -> bool {
        matches!(self, Dialect::OpenDj)
    }

    /// Returns whether the dialect accepts custom LDAP syntaxes.
    pub fn supports_custom_syntaxes(self) -> bool {
        matches!(self, Dialect::OpenDj)
    }

    /// The label prefixed to an emitted attribute type.
    fn attribute_type_label(self) -> &'static str {
        match self {
            Dialect::OpenLdap => "attributetype ",
            Dialect::Ds389 => "attributetypes: ",
            Dialect::OpenDj => "attributeTypes: ",
        }
    }

    /// The label prefixed to an emitted object class.
    fn object_class_label(self) -> &'static str {
        match self {
            Dialect::OpenLdap => "objectclass ",
            Dialect::Ds389 => "objectclasses: ",
            Dialect::OpenDj => "objectClasses: ",
        }
    }

    /// The label prefixed to an emitted name form.
    ///
    /// Only the OpenDJ label is meaningful to a server. The others merely
    /// caption the commented-out listing.
    fn name_form_label(self) -> &'static str {
        match self {
            Dialect::OpenLdap => "nameform ",
            Dialect::Ds389 => "nameforms: ",
            Dialect::OpenDj => "nameForms: ",
        }
    }

    /// The label prefixed to an emitted custom syntax. OpenDJ only.
    fn syntax_label(self) -> &'static str {
        match self {
            Dialect::OpenDj => "ldapSyntaxes: ",
            _ => "ldapsyntax ",
        }
    }
}


//--- FromStr

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openldap" => Ok(Dialect::OpenLdap),
            "389ds" => Ok(Dialect::Ds389),
            "opendj" => Ok(Dialect::OpenDj),
            _ => Err(DialectError(()))
        }
    }
}


//--- Display

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


//------------ Options -------------------------------------------------------

/// Preferences applied while post-processing extracted definitions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// Strip line breaks from each definition and collapse space runs.
    pub suppress_newlines: bool,

    /// Prepend the fixed custom syntaxes and impose them on the legacy
    /// attribute types. Ignored for dialects other than OpenDJ.
    pub include_custom_syntaxes: bool,

    /// Do not append the `X-ORIGIN` tag to emitted definitions.
    pub suppress_extension_origin: bool,
}


//------------ Category ------------------------------------------------------

/// The kind of schema definition, derived from the arc after the prefix.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    /// An LDAP syntax, arc 1. Only meaningful under OpenDJ.
    Syntax,

    /// An attribute type, arc 3.
    AttributeType,

    /// An object class, arc 5.
    ObjectClass,

    /// A name form, arc 7.
    NameForm,

    /// Anything below an arc the I-D series does not assign.
    Unknown,
}

impl Category {
    /// Classifies a definition by its class arc under the given dialect.
    ///
    /// Syntax definitions only count as such for OpenDJ. The other two
    /// servers have no way to load them, so there they surface as unknown
    /// elements for the operator to deal with.
    fn classify(class_arc: &str, dialect: Dialect) -> Self {
        match class_arc {
            "1" if dialect.supports_custom_syntaxes() => Category::Syntax,
            "3" => Category::AttributeType,
            "5" => Category::ObjectClass,
            "7" => Category::NameForm,
            _ => Category::Unknown,
        }
    }
}


//------------ Extraction ----------------------------------------------------

/// The categorized definitions pulled out of a document.
///
/// Produced by [`Extraction::scan`]. The definition texts have had all
/// per-definition post-processing applied; rendering only adds the
/// dialect labels, counts, and the header.
///
/// [`Extraction::scan`]: #method.scan
#[derive(Clone, Debug)]
pub struct Extraction {
    /// The dialect the scan was performed for.
    dialect: Dialect,

    /// Custom LDAP syntaxes. Non-empty only for OpenDJ.
    pub syntaxes: Vec<String>,

    /// Attribute types.
    pub attribute_types: Vec<String>,

    /// Object classes.
    pub object_classes: Vec<String>,

    /// Name forms.
    pub name_forms: Vec<String>,

    /// Definitions below an unassigned arc.
    ///
    /// These carry the origin tag like every other definition, but are
    /// never collapsed onto one line.
    pub unknown: Vec<String>,
}

impl Extraction {
    /// Scans a document for schema definitions.
    ///
    /// For the OpenDJ dialect with custom syntaxes enabled, the fixed
    /// custom syntax definitions are prepended to the document so that
    /// they travel through the same pipeline as everything else.
    ///
    /// Returns an error if the document contains no definitions at all.
    /// Unknown definitions are not an error at this level; they are
    /// collected so the caller can both render and flag them.
    pub fn scan(
        text: &str, dialect: Dialect, options: Options
    ) -> Result<Self, Error> {
        let text = if
            dialect.supports_custom_syntaxes()
            && options.include_custom_syntaxes
        {
            Cow::Owned(format!("{}{}", CUSTOM_SYNTAXES, text))
        }
        else {
            Cow::Borrowed(text)
        };

        let pattern = Regex::new(
            DEFINITION_PATTERN
        ).expect("definition pattern");

        let mut res = Extraction {
            dialect,
            syntaxes: Vec::new(),
            attribute_types: Vec::new(),
            object_classes: Vec::new(),
            name_forms: Vec::new(),
            unknown: Vec::new(),
        };

        let clauses = if
            dialect.supports_custom_syntaxes()
            && options.include_custom_syntaxes
        {
            Some(ClausePatterns::new())
        }
        else {
            None
        };

        for caps in pattern.captures_iter(&text) {
            let mut value = caps[1].trim().to_string();
            let category = Category::classify(&caps[2], dialect);

            if !options.suppress_extension_origin {
                value = append_origin(value, options.suppress_newlines);
            }

            if category == Category::Unknown {
                // Unknown elements carry the origin tag like everything
                // else but keep their line structure, so the operator
                // sees exactly what the scan tripped over.
                res.unknown.push(value);
                continue
            }

            if options.suppress_newlines {
                value = strip_newlines(&value);
            }
            if category == Category::AttributeType {
                if let Some(clauses) = clauses.as_ref() {
                    value = replace_legacy_syntax(
                        value, options.suppress_newlines, clauses
                    );
                }
            }

            match category {
                Category::Syntax => res.syntaxes.push(value),
                Category::AttributeType => res.attribute_types.push(value),
                Category::ObjectClass => res.object_classes.push(value),
                Category::NameForm => res.name_forms.push(value),
                Category::Unknown => unreachable!(),
            }
        }

        if res.is_empty() {
            return Err(Error::NoDefinitions)
        }
        Ok(res)
    }

    /// Returns the dialect the scan was performed for.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the total number of definitions found, unknown included.
    pub fn len(&self) -> usize {
        self.syntaxes.len()
        + self.attribute_types.len()
        + self.object_classes.len()
        + self.name_forms.len()
        + self.unknown.len()
    }

    /// Returns whether the scan came up empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the extraction as a schema listing.
    ///
    /// The `source` is the display name of the scanned document for the
    /// listing header. Sections appear in fixed order, each opened by a
    /// count comment, with unknown elements trailing last and commented.
    pub fn render(&self, source: &str) -> String {
        let mut out = String::new();

        out.push_str("## OID Directory schema - EXPERIMENTAL USE ONLY\n");
        let _ = writeln!(out, "## Formatted for {}", self.dialect.name());
        let _ = writeln!(out, "## Sourced from {}", source);
        out.push_str("##");
        match self.dialect {
            Dialect::OpenLdap => {}
            Dialect::Ds389 => {
                out.push_str(
                    "\n## NOTE: 389DS >=1.4.3 required for UUID support"
                );
                out.push_str("\n#\ndn: cn=schema\n#");
            }
            Dialect::OpenDj => {
                out.push_str("\n#\ndn: cn=schema\n");
                out.push_str("objectClass: top\n");
                out.push_str("objectClass: ldapSubentry\n");
                out.push_str("objectClass: subschema\n#");
            }
        }
        out.push('\n');

        if self.dialect.supports_custom_syntaxes() {
            let _ = writeln!(
                out, "# {} CUSTOM ldap syntaxes\n#", self.syntaxes.len()
            );
            for syntax in &self.syntaxes {
                let _ = writeln!(
                    out, "{}{}\n#", self.dialect.syntax_label(), syntax
                );
            }
        }

        let _ = writeln!(
            out, "# {} attribute types\n#", self.attribute_types.len()
        );
        for attr in &self.attribute_types {
            let _ = writeln!(
                out, "{}{}\n#", self.dialect.attribute_type_label(), attr
            );
        }

        let _ = writeln!(
            out, "# {} object classes\n#", self.object_classes.len()
        );
        for class in &self.object_classes {
            let _ = writeln!(
                out, "{}{}\n#", self.dialect.object_class_label(), class
            );
        }

        if self.dialect.supports_name_forms() {
            let _ = writeln!(
                out, "# {} name forms\n#", self.name_forms.len()
            );
            for form in &self.name_forms {
                let _ = writeln!(
                    out, "{}{}\n#", self.dialect.name_form_label(), form
                );
            }
        }
        else {
            // The listed name forms cannot be loaded here, so every line
            // is disabled and the lot kept purely for reference.
            let _ = writeln!(
                out, "# {} (disabled) name forms\n#", self.name_forms.len()
            );
            for form in &self.name_forms {
                let full = format!(
                    "{}{}", self.dialect.name_form_label(), form
                );
                for line in full.lines() {
                    let _ = writeln!(out, "#{}", line);
                }
                out.push_str("#\n");
            }
        }

        if !self.unknown.is_empty() {
            let _ = writeln!(
                out, "# {} unknown elements\n#", self.unknown.len()
            );
            for item in &self.unknown {
                let _ = writeln!(out, "#{}\n#\n#", item);
            }
        }

        out
    }
}


//------------ Report --------------------------------------------------------

/// The outcome of an extraction run.
///
/// A report always carries the full rendered listing. Definitions below an
/// unassigned arc do not abort the run; they are rendered, commented, at
/// the tail of the listing and flagged here so the caller can mark the
/// document for manual review after routing the output.
#[derive(Clone, Debug)]
pub struct Report {
    /// The rendered schema listing.
    output: String,

    /// The number of unknown elements encountered.
    unknown: usize,
}

impl Report {
    /// Returns the rendered schema listing.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Converts the report into the rendered schema listing.
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns the number of unknown elements encountered.
    pub fn unknown(&self) -> usize {
        self.unknown
    }

    /// Returns whether the run completed without unknown elements.
    ///
    /// A report that isn’t clean should be surfaced as a failure to the
    /// operator, but only after its output has been routed.
    pub fn is_clean(&self) -> bool {
        self.unknown == 0
    }
}


//------------ extract -------------------------------------------------------

/// Extracts the schema definitions of a draft revision.
///
/// The `source` is the display name of the document for the listing
/// header; `text` its full content. Returns the rendered listing together
/// with the unknown-element tally, or an error if the document holds no
/// definitions at all.
pub fn extract(
    source: &str, text: &str, dialect: Dialect, options: Options
) -> Result<Report, Error> {
    let extraction = Extraction::scan(text, dialect, options)?;
    let unknown = extraction.unknown.len();
    Ok(Report {
        output: extraction.render(source),
        unknown
    })
}


//------------ Post-processing helpers ---------------------------------------

/// Swaps the final parenthesis of a definition for the `X-ORIGIN` tag.
///
/// The tag lands on its own continuation line unless newlines are being
/// suppressed, in which case it is joined inline.
fn append_origin(mut value: String, inline: bool) -> String {
    value.truncate(value.len() - 1);
    if inline {
        value.push_str(X_ORIGIN);
    }
    else {
        value.push('\n');
        value.push_str(INDENT);
        value.push_str(X_ORIGIN);
    }
    value
}

/// Removes line breaks and collapses runs of spaces.
fn strip_newlines(value: &str) -> String {
    let mut res = String::with_capacity(value.len());
    let mut last_space = false;
    for ch in value.chars() {
        if ch == '\r' || ch == '\n' {
            continue
        }
        if ch == ' ' {
            if last_space {
                continue
            }
            last_space = true;
        }
        else {
            last_space = false;
        }
        res.push(ch);
    }
    res
}

/// The clause patterns consulted while imposing custom syntaxes.
///
/// Compiled once per scan rather than once per attribute type.
struct ClausePatterns {
    /// An explicit `SYNTAX` clause with a numeric OID.
    explicit: Regex,

    /// A `SUP` clause naming a supertype.
    sup: Regex,
}

impl ClausePatterns {
    fn new() -> Self {
        ClausePatterns {
            explicit: Regex::new(
                r"SYNTAX\s[012](?:\.\d+)+"
            ).expect("syntax clause pattern"),
            sup: Regex::new(r"SUP\s\w+").expect("sup clause pattern"),
        }
    }
}

/// Imposes a custom syntax on an attribute type from the replacement table.
///
/// Attribute types whose OID is not in the table pass through untouched.
/// For the rest, an explicit `SYNTAX` clause is rewritten in place; absent
/// one, a clause is inserted right after the `SUP` clause. A warning
/// extension is appended after the `X-ORIGIN` tag so administrators know
/// the definition deviates from the I-D series. With the origin tag
/// suppressed there is nothing to anchor the warning to and it is omitted.
fn replace_legacy_syntax(
    value: String, inline: bool, clauses: &ClausePatterns
) -> String {
    // The numeric OID sits right after the opening parenthesis.
    let oid = match value.get(2..).and_then(|rest| rest.split(' ').next()) {
        Some(oid) => oid.trim_end(),
        None => return value
    };
    let replacement = match syntax_replacement(oid) {
        Some(replacement) => replacement,
        None => return value
    };
    let sep = if inline {
        String::from(" ")
    }
    else {
        format!("\n{}", INDENT)
    };

    let mut value = if clauses.explicit.is_match(&value) {
        clauses.explicit.replace_all(
            &value, format!("SYNTAX {}", replacement).as_str()
        ).into_owned()
    }
    else {
        match clauses.sup.find(&value) {
            Some(found) => {
                format!(
                    "{}{}SYNTAX {}{}",
                    &value[..found.end()], sep, replacement,
                    &value[found.end()..]
                )
            }
            None => value
        }
    };

    let origin = "draft-coretta-oiddir-schema'";
    if let Some(pos) = value.find(origin) {
        let end = pos + origin.len();
        value = format!(
            "{}{}X-WARNING 'syntax replacement'{}",
            &value[..end], sep, &value[end..]
        );
    }
    value
}


//------------ Error ---------------------------------------------------------

/// An error happened while extracting definitions from a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The document contains no definitions below the official prefix.
    NoDefinitions,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoDefinitions => {
                f.write_str("no schema definitions parsed")
            }
        }
    }
}

impl error::Error for Error { }


//------------ DialectError --------------------------------------------------

/// A string did not name a supported dialect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DialectError(());

impl fmt::Display for DialectError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("unsupported dialect (expected openldap, 389ds, or opendj)")
    }
}

impl error::Error for DialectError { }


//------------ Custom syntaxes -----------------------------------------------

/// Custom LDAP syntaxes, for OpenDJ only.
///
/// These satisfy the syntax concerns mentioned within Section 2.1 of the
/// RASCHEMA I-D. They do NOT extend from the I-D series, and exist only to
/// demonstrate the means for satisfying the aforementioned concerns.
///
/// The block is shaped exactly like the definitions inside a draft
/// revision (blank line, six-space indent, trailing blank line) so that
/// prepending it to the document lets the ordinary scan pick it up.
const CUSTOM_SYNTAXES: &str = r#"
      ( 1.3.6.1.4.1.56521.101.2.1.3
          DESC 'X.680, cl. 34: OID-IRI'
          X-PATTERN '^(\/[A-Za-z0-9\-._~]+|[\uA0000-\uD7FF]+|[\uF900}-\uFDCF]+|[\uFDF0}-\uFFEF]+|[\u10000}-\u1FFFD]+|[\u20000}-\u2FFFD]+|[\u30000}-\u3FFFD]+|[\u40000}-\u4FFFD]+|[\u50000}-\u5FFFD]+|[\u60000}-\u6FFFD]+|[\u70000}-\u7FFFD]+|[\u80000}-\u8FFFD]+|[\u90000}-\u9FFFD]+|[\uA0000}-\uAFFFD]+|[\uB0000}-\uBFFFD]+|[\uC0000}-\uCFFFD]+|[\uD0000}-\uDFFFD]+|[\uE1000}-\uEFFFD]+)+$' )

      ( 1.3.6.1.4.1.56521.101.2.1.4
          DESC 'X.680, cl 32.3: ObjectIdentifierValue'
          X-PATTERN '^\{([a-z](-?[A-Za-z0-9]+)*(\(\d+\))?)(\s([a-z](-?[A-Za-z0-9]+)*(\(\d+\))))*\}$' )

      ( 1.3.6.1.4.1.56521.101.2.1.5
          DESC 'X.660, cl 7.5: non-integer Unicode label'
          X-PATTERN '^([A-Za-z0-9\-._~]+|[\uA0000-\uD7FF]+|[\uF900}-\uFDCF]+|[\uFDF0}-\uFFEF]+|[\u10000}-\u1FFFD]+|[\u20000}-\u2FFFD]+|[\u30000}-\u3FFFD]+|[\u40000}-\u4FFFD]+|[\u50000}-\u5FFFD]+|[\u60000}-\u6FFFD]+|[\u70000}-\u7FFFD]+|[\u80000}-\u8FFFD]+|[\u90000}-\u9FFFD]+|[\uA0000}-\uAFFFD]+|[\uB0000}-\uBFFFD]+|[\uC0000}-\uCFFFD]+|[\uD0000}-\uDFFFD]+|[\uE1000}-\uEFFFD]+)+$' )

      ( 1.3.6.1.4.1.56521.101.2.1.7
          DESC 'X.680, cl. 12.3: Identifier'
          X-PATTERN '^[a-z](-?[A-Za-z0-9]+)*$' )

      ( 1.3.6.1.4.1.56521.101.2.1.18
          DESC 'X.660, cl. A.2-A.3: StandardizedNameForm'
          X-PATTERN '^\{(([a-z](-?[A-Za-z0-9]+)*)|\d+)+\}$' )

      ( 1.3.6.1.4.1.56521.101.2.1.19
          DESC 'X.680, cl. 32.3: NameAndNumberForm'
          X-PATTERN '^[a-z](-?[A-Za-z0-9]+)*(\(\d+\))$' )

      ( 1.3.6.1.4.1.56521.101.2.1.20
          DESC 'X.660, cl. A.7: Long Arc'
          X-PATTERN '^\/([A-Za-z0-9\-._~]+|[\uA0000-\uD7FF]+|[\uF900}-\uFDCF]+|[\uFDF0}-\uFFEF]+|[\u10000}-\u1FFFD]+|[\u20000}-\u2FFFD]+|[\u30000}-\u3FFFD]+|[\u40000}-\u4FFFD]+|[\u50000}-\u5FFFD]+|[\u60000}-\u6FFFD]+|[\u70000}-\u7FFFD]+|[\u80000}-\u8FFFD]+|[\u90000}-\u9FFFD]+|[\uA0000}-\uAFFFD]+|[\uB0000}-\uBFFFD]+|[\uC0000}-\uCFFFD]+|[\uD0000}-\uDFFFD]+|[\uE1000}-\uEFFFD]+)+$' )

"#;


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    // A minimal slice of draft text: one attribute type, one object
    // class, one name form. Definitions are preceded and followed by
    // blank lines and indented six spaces, as in the published drafts.
    const DRAFT: &str = "\
\n      ( 1.3.6.1.4.1.56521.101.2.3.7\n          NAME 'n'\n          \
DESC 'an unsigned arc number'\n          EQUALITY integerMatch\n          \
SYNTAX 1.3.6.1.4.1.1466.115.121.1.27\n          SINGLE-VALUE )\n\
\n      ( 1.3.6.1.4.1.56521.101.2.5.3\n          NAME 'rootArc'\n          \
DESC 'root arc STRUCTURAL class'\n          SUP top STRUCTURAL\n          \
MUST n )\n\
\n      ( 1.3.6.1.4.1.56521.101.2.7.1\n          NAME 'rootArcForm'\n          \
OC rootArc\n          MUST n )\n\nText continues.\n";

    fn scan(
        text: &str, dialect: Dialect, options: Options
    ) -> Extraction {
        Extraction::scan(text, dialect, options).unwrap()
    }

    #[test]
    fn empty_document_is_an_error() {
        assert_eq!(
            Extraction::scan(
                "nothing to see here\n",
                Dialect::OpenLdap,
                Options::default()
            ).unwrap_err(),
            Error::NoDefinitions
        );
        assert_eq!(
            extract(
                "draft.txt", "", Dialect::Ds389, Options::default()
            ).unwrap_err(),
            Error::NoDefinitions
        );
    }

    #[test]
    fn categorizes_by_class_arc() {
        let res = scan(DRAFT, Dialect::OpenLdap, Options::default());
        assert_eq!(res.attribute_types.len(), 1);
        assert_eq!(res.object_classes.len(), 1);
        assert_eq!(res.name_forms.len(), 1);
        assert_eq!(res.syntaxes.len(), 0);
        assert_eq!(res.unknown.len(), 0);
        assert_eq!(res.len(), 3);
        assert!(res.attribute_types[0].starts_with(
            "( 1.3.6.1.4.1.56521.101.2.3.7"
        ));
    }

    #[test]
    fn single_attribute_type_only() {
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.3.7\n          \
                   NAME 'n' )\n\n";
        let res = scan(doc, Dialect::OpenLdap, Options::default());
        assert_eq!(res.attribute_types.len(), 1);
        assert_eq!(res.len(), 1);
    }

    #[test]
    fn unassigned_arc_is_unknown() {
        let doc = format!(
            "{}\n      ( 1.3.6.1.4.1.56521.101.2.9.1\n          \
             NAME 'mystery' )\n\n",
            DRAFT.trim_end_matches("Text continues.\n")
        );
        let res = scan(&doc, Dialect::OpenLdap, Options::default());
        assert_eq!(res.unknown.len(), 1);
        assert!(res.unknown[0].contains("mystery"));
        // Unknown elements are tagged like everything else.
        assert!(res.unknown[0].ends_with(
            "\n          X-ORIGIN 'draft-coretta-oiddir-schema' )"
        ));

        let report = extract(
            "draft.txt", &doc, Dialect::OpenLdap, Options::default()
        ).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.unknown(), 1);
        // Recognized definitions still render ahead of the flagged one.
        assert!(report.output().contains("# 1 attribute types"));
        assert!(report.output().contains("# 1 unknown elements"));
        assert!(report.output().contains("#( 1.3.6.1.4.1.56521.101.2.9.1"));
    }

    #[test]
    fn syntax_definition_outside_opendj_is_unknown() {
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.1.7\n          \
                   DESC 'X.680, cl. 12.3: Identifier' )\n\n";
        let res = scan(doc, Dialect::OpenLdap, Options::default());
        assert_eq!(res.unknown.len(), 1);
        assert!(res.unknown[0].ends_with(
            "\n          X-ORIGIN 'draft-coretta-oiddir-schema' )"
        ));
        let res = scan(doc, Dialect::OpenDj, Options::default());
        assert_eq!(res.syntaxes.len(), 1);
        assert_eq!(res.unknown.len(), 0);
    }

    #[test]
    fn unknown_elements_honor_origin_suppression() {
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.1.7\n          \
                   DESC 'X.680, cl. 12.3: Identifier' )\n\n";
        let res = scan(
            doc,
            Dialect::OpenLdap,
            Options {
                suppress_extension_origin: true,
                ..Options::default()
            }
        );
        assert!(!res.unknown[0].contains("X-ORIGIN"));
        assert!(res.unknown[0].ends_with("Identifier' )"));
    }

    #[test]
    fn unknown_elements_keep_their_lines() {
        // Newline suppression never collapses unknown elements.
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.9.1\n          \
                   NAME 'mystery' )\n\n";
        let res = scan(
            doc,
            Dialect::OpenLdap,
            Options { suppress_newlines: true, ..Options::default() }
        );
        assert!(res.unknown[0].contains('\n'));
        // Inline tag placement still applies.
        assert!(res.unknown[0].ends_with(
            "'mystery' X-ORIGIN 'draft-coretta-oiddir-schema' )"
        ));
    }

    #[test]
    fn origin_tag_lands_on_continuation_line() {
        let res = scan(DRAFT, Dialect::OpenLdap, Options::default());
        assert!(res.attribute_types[0].ends_with(
            "\n          X-ORIGIN 'draft-coretta-oiddir-schema' )"
        ));
    }

    #[test]
    fn origin_tag_suppressed() {
        let res = scan(
            DRAFT,
            Dialect::OpenLdap,
            Options {
                suppress_extension_origin: true,
                ..Options::default()
            }
        );
        assert!(!res.attribute_types[0].contains("X-ORIGIN"));
        assert!(res.attribute_types[0].ends_with("SINGLE-VALUE )"));
    }

    #[test]
    fn newline_suppression_collapses_definitions() {
        let res = scan(
            DRAFT,
            Dialect::OpenLdap,
            Options { suppress_newlines: true, ..Options::default() }
        );
        let attr = &res.attribute_types[0];
        assert!(!attr.contains('\n'));
        assert!(!attr.contains("  "));
        assert_eq!(
            attr,
            "( 1.3.6.1.4.1.56521.101.2.3.7 NAME 'n' \
             DESC 'an unsigned arc number' EQUALITY integerMatch \
             SYNTAX 1.3.6.1.4.1.1466.115.121.1.27 SINGLE-VALUE \
             X-ORIGIN 'draft-coretta-oiddir-schema' )"
        );
    }

    #[test]
    fn name_forms_commented_outside_opendj() {
        for dialect in [Dialect::OpenLdap, Dialect::Ds389] {
            let report = extract(
                "draft.txt", DRAFT, dialect, Options::default()
            ).unwrap();
            assert!(report.is_clean());
            let output = report.output();
            assert!(output.contains("# 1 (disabled) name forms"));
            let start = output.find(
                &format!("#{}", dialect.name_form_label())
            ).unwrap();
            for line in output[start..].lines().take(4) {
                assert!(
                    line.starts_with('#'),
                    "name form line not disabled: {}", line
                );
            }
        }
    }

    #[test]
    fn name_forms_enabled_for_opendj() {
        let report = extract(
            "draft.txt", DRAFT, Dialect::OpenDj, Options::default()
        ).unwrap();
        assert!(report.output().contains("# 1 name forms"));
        assert!(report.output().contains(
            "nameForms: ( 1.3.6.1.4.1.56521.101.2.7.1"
        ));
    }

    #[test]
    fn dialect_headers_and_labels() {
        let report = extract(
            "draft.txt", DRAFT, Dialect::OpenLdap, Options::default()
        ).unwrap();
        assert!(report.output().starts_with(
            "## OID Directory schema - EXPERIMENTAL USE ONLY\n\
             ## Formatted for openldap\n\
             ## Sourced from draft.txt\n\
             ##\n"
        ));
        assert!(report.output().contains("\nattributetype ( "));
        assert!(report.output().contains("\nobjectclass ( "));

        let report = extract(
            "draft.txt", DRAFT, Dialect::Ds389, Options::default()
        ).unwrap();
        assert!(report.output().contains(
            "## NOTE: 389DS >=1.4.3 required for UUID support"
        ));
        assert!(report.output().contains("\ndn: cn=schema\n"));
        assert!(report.output().contains("\nattributetypes: ( "));

        let report = extract(
            "draft.txt", DRAFT, Dialect::OpenDj, Options::default()
        ).unwrap();
        assert!(report.output().contains(
            "\ndn: cn=schema\nobjectClass: top\n\
             objectClass: ldapSubentry\nobjectClass: subschema\n#\n"
        ));
        assert!(report.output().contains("\nattributeTypes: ( "));
    }

    #[test]
    fn custom_syntaxes_prepended_for_opendj() {
        let options = Options {
            include_custom_syntaxes: true,
            ..Options::default()
        };
        let res = scan(DRAFT, Dialect::OpenDj, options);
        assert_eq!(res.syntaxes.len(), 7);
        assert!(res.syntaxes[0].starts_with(
            "( 1.3.6.1.4.1.56521.101.2.1.3"
        ));
        let report = extract(
            "draft.txt", DRAFT, Dialect::OpenDj, options
        ).unwrap();
        assert!(report.output().contains("# 7 CUSTOM ldap syntaxes"));
        assert!(report.output().contains(
            "ldapSyntaxes: ( 1.3.6.1.4.1.56521.101.2.1.20"
        ));

        // Outside OpenDJ the flag has no effect.
        let res = scan(DRAFT, Dialect::OpenLdap, options);
        assert_eq!(res.syntaxes.len(), 0);
        assert_eq!(res.unknown.len(), 0);
    }

    #[test]
    fn legacy_syntax_rewritten_in_place() {
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.3.3\n          \
                   NAME 'aSN1Notation'\n          \
                   SYNTAX 1.3.6.1.4.1.1466.115.121.1.15 )\n\n";
        let options = Options {
            include_custom_syntaxes: true,
            ..Options::default()
        };
        let res = scan(doc, Dialect::OpenDj, options);
        let attr = &res.attribute_types[0];
        assert!(attr.contains("SYNTAX 1.3.6.1.4.1.56521.101.2.1.3"));
        assert!(!attr.contains("SYNTAX 1.3.6.1.4.1.1466.115.121.1.15"));
        assert!(attr.contains(
            "draft-coretta-oiddir-schema'\n          \
             X-WARNING 'syntax replacement'"
        ));
    }

    #[test]
    fn legacy_syntax_inserted_after_sup() {
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.3.18\n          \
                   NAME 'stdNameForm'\n          SUP nameAndNumberForm )\n\n";
        let options = Options {
            include_custom_syntaxes: true,
            ..Options::default()
        };
        let res = scan(doc, Dialect::OpenDj, options);
        assert!(res.attribute_types[0].contains(
            "SUP nameAndNumberForm\n          \
             SYNTAX 1.3.6.1.4.1.56521.101.2.1.18"
        ));
        assert!(res.attribute_types[0].contains("X-WARNING"));
    }

    #[test]
    fn legacy_syntax_rewrite_honors_newline_suppression() {
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.3.18\n          \
                   NAME 'stdNameForm'\n          SUP nameAndNumberForm )\n\n";
        let options = Options {
            include_custom_syntaxes: true,
            suppress_newlines: true,
            ..Options::default()
        };
        let res = scan(doc, Dialect::OpenDj, options);
        let attr = &res.attribute_types[0];
        assert!(!attr.contains('\n'));
        assert!(attr.contains(
            "SUP nameAndNumberForm SYNTAX 1.3.6.1.4.1.56521.101.2.1.18"
        ));
        assert!(attr.contains(
            "draft-coretta-oiddir-schema' X-WARNING 'syntax replacement'"
        ));
    }

    #[test]
    fn attribute_outside_table_is_untouched() {
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.3.1\n          \
                   NAME 'rAttr'\n          \
                   SYNTAX 1.3.6.1.4.1.1466.115.121.1.15 )\n\n";
        let options = Options {
            include_custom_syntaxes: true,
            ..Options::default()
        };
        let res = scan(doc, Dialect::OpenDj, options);
        let attr = &res.attribute_types[0];
        assert!(attr.contains("SYNTAX 1.3.6.1.4.1.1466.115.121.1.15"));
        assert!(!attr.contains("X-WARNING"));
    }

    #[test]
    fn warning_needs_origin_anchor() {
        let doc = "\n      ( 1.3.6.1.4.1.56521.101.2.3.3\n          \
                   NAME 'aSN1Notation'\n          \
                   SYNTAX 1.3.6.1.4.1.1466.115.121.1.15 )\n\n";
        let options = Options {
            include_custom_syntaxes: true,
            suppress_extension_origin: true,
            ..Options::default()
        };
        let res = scan(doc, Dialect::OpenDj, options);
        let attr = &res.attribute_types[0];
        assert!(attr.contains("SYNTAX 1.3.6.1.4.1.56521.101.2.1.3"));
        assert!(!attr.contains("X-WARNING"));
    }

    #[test]
    fn counts_match_records() {
        let doc = format!(
            "{}\n      ( 1.3.6.1.4.1.56521.101.2.3.8\n          \
             NAME 'other' )\n\n",
            DRAFT.trim_end_matches("Text continues.\n")
        );
        let report = extract(
            "draft.txt", &doc, Dialect::OpenLdap, Options::default()
        ).unwrap();
        assert!(report.output().contains("# 2 attribute types"));
        assert!(report.output().contains("# 1 object classes"));
        assert!(report.output().contains("# 1 (disabled) name forms"));
    }

    #[test]
    fn dialect_from_str() {
        assert_eq!(
            Dialect::from_str("openldap").unwrap(), Dialect::OpenLdap
        );
        assert_eq!(Dialect::from_str("389ds").unwrap(), Dialect::Ds389);
        assert_eq!(Dialect::from_str("OpenDJ").unwrap(), Dialect::OpenDj);
        assert!(Dialect::from_str("sunone").is_err());
        assert!(Dialect::from_str("").is_err());
    }

    #[test]
    fn definitions_need_their_blank_line_fences() {
        // No blank line ahead of the definition: not a match.
        let doc = "      ( 1.3.6.1.4.1.56521.101.2.3.7\n          \
                   NAME 'n' )\n\n";
        assert!(Extraction::scan(
            doc, Dialect::OpenLdap, Options::default()
        ).is_err());
        // Indented less than six spaces: not a match.
        let doc = "\n   ( 1.3.6.1.4.1.56521.101.2.3.7 NAME 'n' )\n\n";
        assert!(Extraction::scan(
            doc, Dialect::OpenLdap, Options::default()
        ).is_err());
    }
}
