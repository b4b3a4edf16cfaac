//! Turns animals and totals into sentences of the active locale.
//!
//! Templates use printf-style verbs filled positionally: `%v`, `%s`, `%d`,
//! `%f` with an optional `.N` precision, and `%%` for a literal percent sign.

use anyhow::Result;

use crate::{
    animal::{Animal, PetName},
    locale::LocaleBundle,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateArg<'a> {
    Text(&'a str),
    Float(f64),
    Int(u64),
}

impl TemplateArg<'_> {
    fn render(&self, precision: Option<usize>, verb: char) -> String {
        match self {
            TemplateArg::Text(text) => text.to_string(),
            TemplateArg::Int(value) => value.to_string(),
            TemplateArg::Float(value) => match (precision, verb) {
                (Some(precision), _) => format!("{value:.precision$}"),
                (None, 'f') => format!("{value:.6}"),
                _ => value.to_string(),
            },
        }
    }
}

/// Fills `template` left to right. Verbs without a matching argument are
/// kept verbatim; surplus arguments are ignored.
pub fn fill_template(template: &str, args: &[TemplateArg<'_>]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = String::from('%');
        let mut precision = None;
        if chars.peek() == Some(&'.') {
            spec.push('.');
            chars.next();
            let mut digits = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(d);
                chars.next();
            }
            spec.push_str(&digits);
            precision = digits.parse::<usize>().ok();
        }

        match chars.peek().copied() {
            Some(verb @ ('v' | 's' | 'd' | 'f')) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(&arg.render(precision, verb)),
                    None => {
                        out.push_str(&spec);
                        out.push(verb);
                    }
                }
            }
            _ => out.push_str(&spec),
        }
    }
    out
}

/// Upper-cases the first letter of each hyphen-joined segment of the leading
/// whitespace-delimited token and leaves the rest of the text untouched.
pub fn capitalize_first_word(text: &str) -> String {
    let split = text.find(char::is_whitespace).unwrap_or(text.len());
    let (head, tail) = text.split_at(split);
    let mut out = String::with_capacity(text.len());
    let mut segment_start = true;
    for c in head.chars() {
        if segment_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        segment_start = c == '-';
    }
    out.push_str(tail);
    out
}

pub struct Presenter<'a> {
    bundle: &'a LocaleBundle,
    locale: String,
}

impl<'a> Presenter<'a> {
    pub fn new(bundle: &'a LocaleBundle, locale: impl Into<String>) -> Self {
        Self {
            bundle,
            locale: locale.into(),
        }
    }

    pub fn message(&self, key: &str) -> Result<&'a str> {
        Ok(self.bundle.lookup(&self.locale, key)?)
    }

    /// Capitalization applies in every locale.
    pub fn format(
        &self,
        template_key: &str,
        species: &str,
        weight: f64,
        food: u64,
    ) -> Result<String> {
        let template = self.message(template_key)?;
        let filled = fill_template(
            template,
            &[
                TemplateArg::Text(species),
                TemplateArg::Float(weight),
                TemplateArg::Int(food),
            ],
        );
        Ok(capitalize_first_word(&filled))
    }

    pub fn display_name(&self, animal: &dyn Animal) -> Result<String> {
        let noun = self.message(animal.species().key())?;
        let name = match animal.name() {
            PetName::Default => {
                fill_template(self.message("default_name")?, &[TemplateArg::Text(noun)])
            }
            PetName::Usual(name) => fill_template(
                self.message("usual_name")?,
                &[TemplateArg::Text(noun), TemplateArg::Text(name)],
            ),
            PetName::Special(name) => fill_template(
                self.message("special_name")?,
                &[TemplateArg::Text(noun), TemplateArg::Text(name)],
            ),
        };
        Ok(name)
    }

    pub fn pet_line(&self, animal: &dyn Animal) -> Result<String> {
        let name = self.display_name(animal)?;
        self.format("pet_info", &name, animal.weight(), animal.food_required())
    }

    pub fn food_summary(&self, total: u64) -> Result<String> {
        let template = self.message("ffood_info")?;
        Ok(fill_template(template, &[TemplateArg::Int(total)]))
    }
}
