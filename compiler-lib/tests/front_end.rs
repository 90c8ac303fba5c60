use asciifile::AsciiFile;
use ast::{Decl, Exp, Implementation, Program, Signature, TypeExpr};
use compiler_lib::Driver;
use itertools::Itertools;
use std::{cell::RefCell, io, rc::Rc};
use termcolor::{Buffer, ColorSpec, WriteColor};
use type_checking::MhType;

/// `termcolor::Buffer` that can still be read after the driver took it
#[derive(Clone)]
struct SharedBuffer(Rc<RefCell<Buffer>>);

impl SharedBuffer {
    fn new() -> Self {
        SharedBuffer(Rc::new(RefCell::new(Buffer::no_color())))
    }

    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().as_slice().to_vec()).unwrap()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

impl WriteColor for SharedBuffer {
    fn supports_color(&self) -> bool {
        false
    }

    fn set_color(&mut self, spec: &ColorSpec) -> io::Result<()> {
        self.0.borrow_mut().set_color(spec)
    }

    fn reset(&mut self) -> io::Result<()> {
        self.0.borrow_mut().reset()
    }
}

const SUCCESSOR: &str = "-- successor\n\
                         inc :: Integer -> Integer ;\n\
                         inc n = n + 1 ;\n";

fn int_to_int() -> TypeExpr {
    TypeExpr::function(TypeExpr::Integer, TypeExpr::Integer)
}

/// What a parser makes of `SUCCESSOR`
fn successor_program() -> Program {
    Program::new(vec![Decl::new(
        Signature::new("inc", int_to_int()),
        Implementation::new("inc", &["n"], Exp::infix("+", Exp::var("n"), Exp::num("1"))),
    )])
}

#[test]
fn lexes_and_checks_a_program() {
    let buffer = SharedBuffer::new();
    let mut driver = Driver::default()
        .check_symbols(true)
        .set_writer_err(Box::new(buffer.clone()));
    let file = AsciiFile::new(SUCCESSOR.as_bytes()).unwrap();
    let context = driver.context(&file);

    let tokens = driver.lex(&context).unwrap();
    let classes = tokens.iter().map(|token| token.data.class.as_str()).join(" ");
    assert_eq!(
        classes,
        "VAR :: Integer -> Integer ; VAR VAR = VAR + NUM ;"
    );

    let checked = driver.check(&context, &successor_program()).unwrap();
    assert_eq!(
        checked.get("inc"),
        Some(&Exp::lambda(
            "n",
            Exp::infix("+", Exp::var("n"), Exp::num("1"))
        ))
    );

    context.diagnostics.write_statistics();
    assert!(!context.diagnostics.errored());
    assert_eq!(
        buffer.contents(),
        "Compilation finished successfully without warnings\n"
    );
}

#[test]
fn lexemes_reconstruct_the_source() {
    let acceptors = lexer::AcceptorSet::micro_haskell();
    let lexemes = lexer::Lexer::new(SUCCESSOR.chars(), &acceptors)
        .keep_discarded()
        .map(|token| token.unwrap().data.text)
        .join("");
    assert_eq!(lexemes, SUCCESSOR);
}

#[test]
fn lexical_error_with_snippet() {
    let buffer = SharedBuffer::new();
    let mut driver = Driver::default().set_writer_err(Box::new(buffer.clone()));
    let file = AsciiFile::new(b"x = 1 , 2").unwrap();
    let context = driver.context(&file);

    assert!(driver.lex(&context).is_none());
    assert!(context.diagnostics.errored());
    assert_eq!(
        buffer.contents(),
        "error: Unexpected character ','\n   | \n 1 | x = 1 , 2\n   |       ^\n\n"
    );
}

#[test]
fn unknown_symbol_with_snippet() {
    let buffer = SharedBuffer::new();
    let mut driver = Driver::default()
        .check_symbols(true)
        .set_writer_err(Box::new(buffer.clone()));
    let file = AsciiFile::new(b"x = y *** 2").unwrap();
    let context = driver.context(&file);

    assert!(driver.lex(&context).is_none());
    assert_eq!(
        buffer.contents(),
        "error: Unknown symbol `***`\n   | \n 1 | x = y *** 2\n   |       ^^^\n\n"
    );
}

#[test]
fn check_errors_are_reported() {
    let buffer = SharedBuffer::new();
    let mut driver = Driver::default().set_writer_err(Box::new(buffer.clone()));
    let file = AsciiFile::new(b"").unwrap();
    let context = driver.context(&file);

    let program = Program::new(vec![Decl::new(
        Signature::new("f", TypeExpr::Integer),
        Implementation::new("g", &[], Exp::num("1")),
    )]);

    assert!(driver.check(&context, &program).is_none());
    assert!(context.diagnostics.errored());
    assert_eq!(
        buffer.contents(),
        "error: type signature for 'f' is followed by a definition of 'g'\n\n"
    );
}

#[test]
fn type_errors_are_reported() {
    let buffer = SharedBuffer::new();
    let mut driver = Driver::default().set_writer_err(Box::new(buffer.clone()));
    let file = AsciiFile::new(b"").unwrap();
    let context = driver.context(&file);

    // f :: Integer ; f = if 1 then 1 else 2 ;
    let program = Program::new(vec![Decl::new(
        Signature::new("f", TypeExpr::Integer),
        Implementation::new(
            "f",
            &[],
            Exp::cond(Exp::num("1"), Exp::num("1"), Exp::num("2")),
        ),
    )]);

    assert!(driver.check(&context, &program).is_none());
    assert_eq!(
        buffer.contents(),
        "error: type error: condition must be of type Bool, found Integer\n\n"
    );
}

#[test]
fn checked_program_keeps_declaration_order() {
    // b :: Bool ; b = True ;
    // a :: Integer -> Integer -> Integer ; a x y = if b then x else y ;
    let program = Program::new(vec![
        Decl::new(
            Signature::new("b", TypeExpr::Bool),
            Implementation::new("b", &[], Exp::boolean("True")),
        ),
        Decl::new(
            Signature::new("a", TypeExpr::function(TypeExpr::Integer, int_to_int())),
            Implementation::new(
                "a",
                &["x", "y"],
                Exp::cond(Exp::var("b"), Exp::var("x"), Exp::var("y")),
            ),
        ),
    ]);

    let env = type_checking::compile_type_env(&program).unwrap();
    assert_eq!(
        env.type_of("a").unwrap().to_string(),
        "Integer -> Integer -> Integer"
    );
    assert_eq!(env.type_of("b"), Ok(&MhType::Bool));

    let checked = type_checking::typecheck_prog(&program, &env).unwrap();
    assert_eq!(checked.names().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(
        checked.to_string(),
        "b = True\na = (\\x -> (\\y -> (if b then x else y)))"
    );
}
