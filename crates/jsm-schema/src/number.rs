//! Number-kind keywords. The same payload serves `number` and `integer`
//! nodes; the declared type-set decides whether fractional values pass.

use crate::error::SchemaConstructionError;
use crate::keyword::Keyword;
use crate::node::{Kind, KindKeywords, SchemaNode};

/// Keywords carried by number nodes. Bounds are finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberKeywords {
    pub(crate) minimum: Option<f64>,
    pub(crate) maximum: Option<f64>,
    pub(crate) exclusive_minimum: Option<f64>,
    pub(crate) exclusive_maximum: Option<f64>,
    pub(crate) multiple_of: Option<f64>,
}

impl NumberKeywords {
    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<f64> {
        self.maximum
    }

    pub fn exclusive_minimum(&self) -> Option<f64> {
        self.exclusive_minimum
    }

    pub fn exclusive_maximum(&self) -> Option<f64> {
        self.exclusive_maximum
    }

    pub fn multiple_of(&self) -> Option<f64> {
        self.multiple_of
    }

    pub(crate) fn check_bounds(&self) -> Result<(), SchemaConstructionError> {
        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min > max {
                return Err(SchemaConstructionError::invalid(
                    Keyword::Maximum.as_str(),
                    format!("maximum {max} is below minimum {min}"),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self, keyword: Keyword) {
        match keyword {
            Keyword::Minimum => self.minimum = None,
            Keyword::Maximum => self.maximum = None,
            Keyword::ExclusiveMinimum => self.exclusive_minimum = None,
            Keyword::ExclusiveMaximum => self.exclusive_maximum = None,
            Keyword::MultipleOf => self.multiple_of = None,
            _ => {}
        }
    }
}

fn finite(keyword: Keyword, x: f64) -> Result<f64, SchemaConstructionError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(SchemaConstructionError::invalid(
            keyword.as_str(),
            format!("{x} is not a finite number"),
        ))
    }
}

impl SchemaNode {
    /// The number keywords, if this is a number node.
    pub fn as_number(&self) -> Option<&NumberKeywords> {
        match &self.kind {
            KindKeywords::Number(k) => Some(k),
            _ => None,
        }
    }

    fn update_number<F>(
        &mut self,
        keyword: Keyword,
        apply: F,
    ) -> Result<&mut Self, SchemaConstructionError>
    where
        F: FnOnce(&mut NumberKeywords) -> Result<(), SchemaConstructionError>,
    {
        self.update(keyword, move |node| match &mut node.kind {
            KindKeywords::Number(k) => apply(k),
            other => Err(SchemaNode::wrong_kind(keyword, Kind::Number, other.kind())),
        })
    }

    /// Set the inclusive `minimum`.
    pub fn set_minimum(&mut self, x: f64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_number(Keyword::Minimum, move |k| {
            k.minimum = Some(finite(Keyword::Minimum, x)?);
            Ok(())
        })
    }

    /// Set the inclusive `maximum`.
    pub fn set_maximum(&mut self, x: f64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_number(Keyword::Maximum, move |k| {
            k.maximum = Some(finite(Keyword::Maximum, x)?);
            Ok(())
        })
    }

    /// Set `exclusiveMinimum` (draft-07 numeric form).
    pub fn set_exclusive_minimum(&mut self, x: f64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_number(Keyword::ExclusiveMinimum, move |k| {
            k.exclusive_minimum = Some(finite(Keyword::ExclusiveMinimum, x)?);
            Ok(())
        })
    }

    /// Set `exclusiveMaximum` (draft-07 numeric form).
    pub fn set_exclusive_maximum(&mut self, x: f64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_number(Keyword::ExclusiveMaximum, move |k| {
            k.exclusive_maximum = Some(finite(Keyword::ExclusiveMaximum, x)?);
            Ok(())
        })
    }

    /// Set `multipleOf`.
    ///
    /// # Errors
    ///
    /// `InvalidKeywordValue` unless the divisor is finite and strictly
    /// positive.
    pub fn set_multiple_of(&mut self, divisor: f64) -> Result<&mut Self, SchemaConstructionError> {
        self.update_number(Keyword::MultipleOf, move |k| {
            let divisor = finite(Keyword::MultipleOf, divisor)?;
            if divisor <= 0.0 {
                return Err(SchemaConstructionError::invalid(
                    Keyword::MultipleOf.as_str(),
                    format!("divisor must be greater than 0, got {divisor}"),
                ));
            }
            k.multiple_of = Some(divisor);
            Ok(())
        })
    }
}
