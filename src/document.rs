//! In-memory PDF object table.
//!
//! Font resolution only needs to dereference indirect objects, so the
//! document here is a map from [`ObjectRef`] to an already-parsed [`Object`].
//! A renderer populates it from its own parser (or builds it by hand in
//! tests) and hands it to [`crate::fonts::CompositeFont::initialize`].

use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};
use std::collections::{HashMap, HashSet};

/// Maximum length of a reference chain (`1 0 R` pointing at `2 0 R` ...).
const MAX_RECURSION_DEPTH: u32 = 100;

/// Read-only object store used to resolve indirect references.
#[derive(Debug, Clone, Default)]
pub struct PdfDocument {
    objects: HashMap<ObjectRef, Object>,
    next_id: u32,
}

impl PdfDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            next_id: 1,
        }
    }

    /// Store `object` under `obj_ref`, replacing any previous object.
    pub fn insert(&mut self, obj_ref: ObjectRef, object: Object) {
        self.next_id = self.next_id.max(obj_ref.id.saturating_add(1));
        self.objects.insert(obj_ref, object);
    }

    /// Store `object` under a fresh object number (generation 0).
    pub fn add(&mut self, object: Object) -> ObjectRef {
        let obj_ref = ObjectRef::new(self.next_id.max(1), 0);
        self.insert(obj_ref, object);
        obj_ref
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the document holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Load an indirect object, following reference chains.
    pub fn load_object(&self, obj_ref: ObjectRef) -> Result<Object> {
        log::trace!("Loading object {} gen {}", obj_ref.id, obj_ref.gen);

        let mut seen = HashSet::new();
        let mut current = obj_ref;
        loop {
            if !seen.insert(current) {
                log::error!("Circular reference detected for object {}", current);
                return Err(Error::CircularReference(current));
            }
            if seen.len() as u32 > MAX_RECURSION_DEPTH {
                return Err(Error::RecursionLimitExceeded(MAX_RECURSION_DEPTH));
            }

            match self.objects.get(&current) {
                Some(Object::Reference(next)) => current = *next,
                Some(object) => return Ok(object.clone()),
                None => return Err(Error::ObjectNotFound(current.id, current.gen)),
            }
        }
    }

    /// Resolve `obj` if it is a reference, otherwise return a copy of it.
    pub fn resolve(&self, obj: &Object) -> Result<Object> {
        match obj {
            Object::Reference(obj_ref) => self.load_object(*obj_ref),
            other => Ok(other.clone()),
        }
    }
}
