use crate::{
    errors::{CheckError, TypeErrorKind},
    type_system::MhType,
};
use std::{collections::HashMap, rc::Rc};

/// Maps variable names to their types.
///
/// An environment consists of the global signatures of a program, shared
/// by all declarations, and a chain of local argument bindings. Binding a
/// variable returns a new environment that shares everything with the old
/// one, so each declaration can extend the globals without affecting its
/// siblings.
#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
    globals: Rc<HashMap<String, MhType>>,
    locals: Option<Rc<Binding>>,
}

#[derive(Debug)]
struct Binding {
    name: String,
    ty: MhType,
    parent: Option<Rc<Binding>>,
}

impl TypeEnv {
    pub fn new(globals: HashMap<String, MhType>) -> Self {
        Self {
            globals: Rc::new(globals),
            locals: None,
        }
    }

    fn local(&self, name: &str) -> Option<&MhType> {
        let mut binding = self.locals.as_ref();
        while let Some(b) = binding {
            if b.name == name {
                return Some(&b.ty);
            }
            binding = b.parent.as_ref();
        }
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.local(name).is_some() || self.globals.contains_key(name)
    }

    pub fn type_of(&self, name: &str) -> Result<&MhType, CheckError> {
        self.local(name)
            .or_else(|| self.globals.get(name))
            .ok_or_else(|| CheckError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// Returns a new environment in which `name` has type `ty`. Shadowing
    /// is not allowed.
    pub fn bind(&self, name: &str, ty: MhType) -> Result<TypeEnv, CheckError> {
        if self.contains(name) {
            return Err(CheckError::DuplicatedVariable {
                name: name.to_string(),
            });
        }

        Ok(TypeEnv {
            globals: Rc::clone(&self.globals),
            locals: Some(Rc::new(Binding {
                name: name.to_string(),
                ty,
                parent: self.locals.clone(),
            })),
        })
    }

    /// Binds each of `args` to the next argument type of the function type
    /// `ty`. Returns the extended environment and what is left of `ty`
    /// once all arguments are consumed.
    pub fn add_arg_bindings<S: AsRef<str>>(
        &self,
        args: &[S],
        ty: &MhType,
    ) -> Result<(TypeEnv, MhType), CheckError> {
        let mut env = self.clone();
        let mut remaining = ty;

        for arg in args {
            match remaining {
                MhType::Function(arg_ty, result) => {
                    env = env.bind(arg.as_ref(), MhType::clone(arg_ty))?;
                    remaining = &**result;
                }
                _ => {
                    return Err(TypeErrorKind::TooManyArguments {
                        count: args.len(),
                        ty: ty.clone(),
                    }
                    .into());
                }
            }
        }

        Ok((env, remaining.clone()))
    }

    /// Number of global signatures.
    pub fn len(&self) -> usize {
        self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }
}
