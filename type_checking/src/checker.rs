use crate::{
    env::TypeEnv,
    errors::{CheckError, TypeErrorKind},
    exp_env::{ExpEnv, NamedExp},
    type_system::MhType,
};
use ast::{Decl, Exp, Program};
use std::collections::{hash_map::Entry, HashMap};

/// Builds the global environment from the type signatures of `program`.
pub fn compile_type_env(program: &Program) -> Result<TypeEnv, CheckError> {
    let mut globals = HashMap::new();

    for signature in program.signatures() {
        match globals.entry(signature.name.clone()) {
            Entry::Occupied(_) => {
                return Err(CheckError::DuplicatedVariable {
                    name: signature.name.clone(),
                });
            }
            Entry::Vacant(e) => {
                e.insert(MhType::from_type_expr(&signature.ty));
            }
        }
    }

    log::info!("type conversions successful");
    Ok(TypeEnv::new(globals))
}

/// Compiles the global environment of `program` and checks every
/// declaration against it.
pub fn check(program: &Program) -> Result<ExpEnv, CheckError> {
    let env = compile_type_env(program)?;
    typecheck_prog(program, &env)
}

pub fn compute_type(exp: &Exp, env: &TypeEnv) -> Result<MhType, CheckError> {
    use self::TypeErrorKind::*;

    match exp {
        Exp::Var(name) => env.type_of(name).map(MhType::clone),
        Exp::Num(digits) => match digits.chars().find(|chr| !chr.is_ascii_digit()) {
            Some(chr) => Err(NonDigitInNumeral {
                literal: digits.clone(),
                chr,
            }
            .into()),
            None => Ok(MhType::Integer),
        },
        Exp::Boolean(text) => match text.as_str() {
            "True" | "False" => Ok(MhType::Bool),
            _ => Err(NotABoolean {
                literal: text.clone(),
            }
            .into()),
        },
        Exp::App(function, arg) => {
            let function_ty = compute_type(function, env)?;
            let arg_ty = compute_type(arg, env)?;

            match function_ty {
                MhType::Function(expected, result) => {
                    if *expected == arg_ty {
                        Ok(*result)
                    } else {
                        Err(ArgumentMismatch {
                            expected: *expected,
                            found: arg_ty,
                        }
                        .into())
                    }
                }
                ty => Err(NotAFunction { ty }.into()),
            }
        }
        Exp::Infix(op, lhs, rhs) => {
            let left = compute_type(lhs, env)?;
            let right = compute_type(rhs, env)?;

            if !left.is_integer() || !right.is_integer() {
                return Err(OperandsNotInteger {
                    op: op.clone(),
                    left,
                    right,
                }
                .into());
            }

            match op.as_str() {
                "==" | "<=" => Ok(MhType::Bool),
                "+" | "-" => Ok(MhType::Integer),
                _ => Err(UnknownOperator { op: op.clone() }.into()),
            }
        }
        Exp::If(cond, then, otherwise) => {
            let cond_ty = compute_type(cond, env)?;
            let then_ty = compute_type(then, env)?;
            let otherwise_ty = compute_type(otherwise, env)?;

            if !cond_ty.is_bool() {
                Err(ConditionNotBool { found: cond_ty }.into())
            } else if then_ty != otherwise_ty {
                Err(BranchMismatch {
                    then: then_ty,
                    otherwise: otherwise_ty,
                }
                .into())
            } else {
                Ok(then_ty)
            }
        }
        Exp::Lambda(..) => Err(Malformed { kind: exp.kind() }.into()),
    }
}

/// Curries `body` over `args`, the last argument becoming the innermost
/// lambda.
pub fn build_closure<S: AsRef<str>>(args: &[S], body: Exp) -> Exp {
    args.iter()
        .rev()
        .fold(body, |body, arg| Exp::lambda(arg.as_ref(), body))
}

pub fn typecheck_decl(decl: &Decl, env: &TypeEnv) -> Result<NamedExp, CheckError> {
    let Decl {
        signature,
        implementation,
    } = decl;

    if signature.name != implementation.name {
        return Err(CheckError::NameMismatch {
            sig_name: signature.name.clone(),
            impl_name: implementation.name.clone(),
        });
    }

    let ty = MhType::from_type_expr(&signature.ty);
    let (local_env, result_ty) = env.add_arg_bindings(implementation.args.as_slice(), &ty)?;
    let body_ty = compute_type(&implementation.body, &local_env)?;

    if body_ty != result_ty {
        return Err(TypeErrorKind::WrongResultType {
            name: signature.name.clone(),
            expected: result_ty,
            found: body_ty,
        }
        .into());
    }

    log::debug!("{} :: {} checked", signature.name, ty);
    Ok(NamedExp::new(
        &signature.name,
        build_closure(implementation.args.as_slice(), implementation.body.clone()),
    ))
}

/// Checks all declarations of `program` in order against `env`, which
/// should hold the signatures of all of them (see `compile_type_env`).
pub fn typecheck_prog(program: &Program, env: &TypeEnv) -> Result<ExpEnv, CheckError> {
    let mut exp_env = ExpEnv::new();

    for decl in &program.decls {
        exp_env.insert(typecheck_decl(decl, env)?)?;
    }

    log::info!("typecheck successful");
    Ok(exp_env)
}
