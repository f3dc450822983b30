//! Derived visibility and deprecation.
//!
//! Both properties walk upward through enclosing scopes and are recomputed on
//! every call; nothing is cached. The walks are acyclic: a message's answer
//! never depends on its fields, so a field consulting its message-typed target
//! cannot loop back to itself.
//!
//! | entity     | visible iff                                    | deprecated iff                       |
//! |------------|------------------------------------------------|--------------------------------------|
//! | file       | own meta PUBLIC                                | own option                           |
//! | message    | file, parent message, own meta                 | file, parent message, own option     |
//! | enum       | file, parent message, own meta                 | per [`EnumDeprecationRule`]          |
//! | enum value | enum, own meta                                 | enum, own option                     |
//! | field      | message, linked type (if any), own meta        | message, linked type, own option     |
//! | oneof      | message                                        | message                              |
//! | service    | file, own meta                                 | file, own option                     |
//! | method     | service, input, output, own meta               | service, input, output, own option   |

use crate::config::EnumDeprecationRule;
use crate::enumeration::{Enum, EnumValue};
use crate::field::Field;
use crate::file::File;
use crate::message::Message;
use crate::oneof::Oneof;
use crate::service::{Method, Service};

/// Properties every entity view answers, and which [`crate::Selection`]
/// filters on.
pub trait Semantic {
    fn is_visible(&self) -> bool;
    fn is_deprecated(&self) -> bool;
    /// Whether the owning file is in the to-generate set.
    fn is_generated(&self) -> bool;
}

/// Entities that may be declared either at file scope or inside a message.
pub trait Nestable {
    fn is_nested(&self) -> bool;
}

// =============================================================================
// File scope
// =============================================================================

impl Semantic for File<'_> {
    fn is_visible(&self) -> bool {
        self.meta().is_public()
    }

    fn is_deprecated(&self) -> bool {
        self.options().deprecated()
    }

    fn is_generated(&self) -> bool {
        self.record.generate
    }
}

impl Semantic for Message<'_> {
    fn is_visible(&self) -> bool {
        if !self.file().is_visible() {
            return false;
        }
        if self.parent().is_some_and(|p| !p.is_visible()) {
            return false;
        }
        self.meta().is_public()
    }

    fn is_deprecated(&self) -> bool {
        if self.file().is_deprecated() {
            return true;
        }
        if self.parent().is_some_and(|p| p.is_deprecated()) {
            return true;
        }
        self.options().deprecated()
    }

    fn is_generated(&self) -> bool {
        self.file().is_generated()
    }
}

impl Nestable for Message<'_> {
    fn is_nested(&self) -> bool {
        self.record.parent.is_some()
    }
}

impl Semantic for Enum<'_> {
    fn is_visible(&self) -> bool {
        if !self.file().is_visible() {
            return false;
        }
        if self.parent().is_some_and(|p| !p.is_visible()) {
            return false;
        }
        self.meta().is_public()
    }

    fn is_deprecated(&self) -> bool {
        let file = self.file();
        let parent = self.parent();
        let inherited = match self.model.config().enum_deprecation {
            EnumDeprecationRule::Ancestors => {
                file.is_deprecated() || parent.is_some_and(|p| p.is_deprecated())
            }
            EnumDeprecationRule::LegacyVisibility => {
                file.is_visible() || parent.is_some_and(|p| p.is_visible())
            }
        };
        inherited || self.options().deprecated()
    }

    fn is_generated(&self) -> bool {
        self.file().is_generated()
    }
}

impl Nestable for Enum<'_> {
    fn is_nested(&self) -> bool {
        self.record.parent.is_some()
    }
}

impl Semantic for Service<'_> {
    fn is_visible(&self) -> bool {
        self.file().is_visible() && self.meta().is_public()
    }

    fn is_deprecated(&self) -> bool {
        self.file().is_deprecated() || self.options().deprecated()
    }

    fn is_generated(&self) -> bool {
        self.file().is_generated()
    }
}

// =============================================================================
// Members
// =============================================================================

impl Semantic for EnumValue<'_> {
    fn is_visible(&self) -> bool {
        self.parent().is_visible() && self.meta().is_public()
    }

    fn is_deprecated(&self) -> bool {
        self.parent().is_deprecated() || self.options().deprecated()
    }

    fn is_generated(&self) -> bool {
        self.parent().is_generated()
    }
}

impl Semantic for Field<'_> {
    fn is_visible(&self) -> bool {
        if !self.parent().is_visible() {
            return false;
        }
        if self.type_message().is_some_and(|t| !t.is_visible()) {
            return false;
        }
        if self.type_enum().is_some_and(|t| !t.is_visible()) {
            return false;
        }
        self.meta().is_public()
    }

    fn is_deprecated(&self) -> bool {
        if self.parent().is_deprecated() {
            return true;
        }
        if self.type_message().is_some_and(|t| t.is_deprecated()) {
            return true;
        }
        if self.type_enum().is_some_and(|t| t.is_deprecated()) {
            return true;
        }
        self.options().deprecated()
    }

    fn is_generated(&self) -> bool {
        self.parent().is_generated()
    }
}

impl Semantic for Oneof<'_> {
    // Oneofs carry no visibility metadata of their own.
    fn is_visible(&self) -> bool {
        self.parent().is_visible()
    }

    fn is_deprecated(&self) -> bool {
        self.parent().is_deprecated()
    }

    fn is_generated(&self) -> bool {
        self.parent().is_generated()
    }
}

impl Semantic for Method<'_> {
    fn is_visible(&self) -> bool {
        self.parent().is_visible()
            && self.input_type().is_visible()
            && self.output_type().is_visible()
            && self.meta().is_public()
    }

    fn is_deprecated(&self) -> bool {
        self.parent().is_deprecated()
            || self.input_type().is_deprecated()
            || self.output_type().is_deprecated()
            || self.options().deprecated()
    }

    fn is_generated(&self) -> bool {
        self.parent().is_generated()
    }
}
