use std::fmt::{self, Write};

use rug::Integer;
use smartstring::{LazyCompact, SmartString};

use crate::{ideal::Ideal, term::Exponent};

/// Names of the variables of a polynomial ring. Variables without a name
/// are printed as `x<index>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarNames {
    names: Vec<SmartString<LazyCompact>>,
}

impl VarNames {
    pub fn new<S: AsRef<str>>(names: &[S]) -> VarNames {
        VarNames {
            names: names.iter().map(|n| n.as_ref().into()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, var: usize) -> Option<&str> {
        self.names.get(var).map(|n| n.as_str())
    }

    fn write_name(&self, var: usize, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get(var) {
            Some(n) => f.write_str(n),
            None => write!(f, "x{}", var),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct PrintOptions {
    pub multiplication_operator: char,
    /// Write `^1` for exponents of one.
    pub print_unit_exponents: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            multiplication_operator: '*',
            print_unit_exponents: false,
        }
    }
}

pub struct TermPrinter<'a> {
    pub term: &'a [Exponent],
    pub names: &'a VarNames,
    pub opts: PrintOptions,
}

impl<'a> TermPrinter<'a> {
    pub fn new(term: &'a [Exponent], names: &'a VarNames) -> TermPrinter<'a> {
        TermPrinter {
            term,
            names,
            opts: PrintOptions::default(),
        }
    }
}

impl fmt::Display for TermPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (var, e) in self.term.iter().enumerate() {
            if *e == 0 {
                continue;
            }

            if !first {
                f.write_char(self.opts.multiplication_operator)?;
            }
            first = false;

            self.names.write_name(var, f)?;
            if *e != 1 || self.opts.print_unit_exponents {
                write!(f, "^{}", e)?;
            }
        }

        if first {
            f.write_char('1')?;
        }
        Ok(())
    }
}

pub struct IdealPrinter<'a> {
    pub ideal: &'a Ideal,
    pub names: &'a VarNames,
    pub opts: PrintOptions,
}

impl<'a> IdealPrinter<'a> {
    pub fn new(ideal: &'a Ideal, names: &'a VarNames) -> IdealPrinter<'a> {
        IdealPrinter {
            ideal,
            names,
            opts: PrintOptions::default(),
        }
    }
}

impl fmt::Display for IdealPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.ideal.is_zero_ideal() {
            return f.write_str("<0>");
        }

        f.write_char('<')?;
        for (i, g) in self.ideal.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{}",
                TermPrinter {
                    term: g,
                    names: self.names,
                    opts: self.opts,
                }
            )?;
        }
        f.write_char('>')
    }
}

/// Prints a sum of terms with integer coefficients in the given order.
pub struct PolynomialPrinter<'a, I> {
    pub terms: I,
    pub names: &'a VarNames,
    pub opts: PrintOptions,
}

impl<'a, 'b, I> fmt::Display for PolynomialPrinter<'a, I>
where
    I: Iterator<Item = (&'b Integer, &'b [Exponent])> + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (coef, term) in self.terms.clone() {
            if *coef == 0 {
                continue;
            }

            let is_one = crate::term::is_identity(term);
            let abs = coef.clone().abs();
            if first {
                if *coef < 0 {
                    f.write_char('-')?;
                }
            } else if *coef < 0 {
                f.write_str(" - ")?;
            } else {
                f.write_str(" + ")?;
            }
            first = false;

            if is_one {
                write!(f, "{}", abs)?;
                continue;
            }

            if abs != 1 {
                write!(f, "{}", abs)?;
                f.write_char(self.opts.multiplication_operator)?;
            }
            write!(
                f,
                "{}",
                TermPrinter {
                    term,
                    names: self.names,
                    opts: self.opts,
                }
            )?;
        }

        if first {
            f.write_char('0')?;
        }
        Ok(())
    }
}
