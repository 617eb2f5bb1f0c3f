use std::fmt;
use std::rc::Rc;

use crate::error;
use crate::value::Value;

type Inner = dyn Fn(&[Value]) -> error::Result<Value>;

/// A callable value.
///
/// A function receives its arguments as a slice. When it is invoked as a
/// method on a value, that value is passed as the first argument.
///
/// Functions are compared by identity: two clones of the same function are
/// equal, two separately created functions never are.
#[derive(Clone)]
pub struct Function(Rc<Inner>);

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> error::Result<Value> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, arguments: &[Value]) -> error::Result<Value> {
        (self.0)(arguments)
    }

    fn address(&self) -> *const () {
        Rc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Function {}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function")
    }
}
