#![no_std]

use core::fmt::Write;

use heapless::{String, Vec};
use veccore::{
    value::{Value, VectorError},
    vector::{
        vec2::{Vec2, Vec2Slot},
        vec3::{Vec3, Vec3Slot},
    },
};

/// Handle to an object in the host arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjId(usize);

/// One host-owned object: a vector slot tagged with its class.
#[derive(Debug)]
pub enum Obj {
    Vec2(Vec2Slot),
    Vec3(Vec3Slot),
}

/// An argument as the host dispatcher passes it.
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    Obj(ObjId),
}

/// A method result marshaled back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Ret {
    Float(f64),
    Obj(ObjId),
    Str(String<128>),
}

/// Host-level dispatch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    /// The receiver's class has no method of the given name.
    NoMethod { class: &'static str },
    /// Wrong number of positional arguments.
    Arity { expected: usize, got: usize },
    /// The handle does not name a live object.
    BadHandle,
    /// The arena is out of capacity.
    Full,
    /// A text form did not fit the host buffer.
    TextOverflow,
    /// The core rejected the operation.
    Vector(VectorError),
}

impl From<VectorError> for HostError {
    fn from(value: VectorError) -> Self {
        Self::Vector(value)
    }
}

enum Produced {
    Float(f64),
    V2(Vec2),
    V3(Vec3),
    Receiver,
    Text(String<128>),
}

/// An in-memory stand-in for the embedding environment.
///
/// Objects live in a fixed-capacity arena and methods are dispatched by
/// name, with allocation kept separate from initialization so that the
/// not-yet-initialized state is reachable exactly as in a real host.
pub struct Host<const N: usize> {
    objects: Vec<Obj, N>,
}

impl<const N: usize> Default for Host<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Host<N> {
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Allocates a 2-vector object with no backing value yet.
    pub fn alloc_vec2(&mut self) -> Result<ObjId, HostError> {
        self.push(Obj::Vec2(Vec2Slot::empty()))
    }

    /// Allocates a 3-vector object with no backing value yet.
    pub fn alloc_vec3(&mut self) -> Result<ObjId, HostError> {
        self.push(Obj::Vec3(Vec3Slot::empty()))
    }

    /// `Vec2` class construction with optional positional components.
    ///
    /// Missing trailing arguments default to zero.
    pub fn vec2_new(&mut self, args: &[Arg<'_>]) -> Result<ObjId, HostError> {
        let components: [f64; 2] = self.opt_floats(args)?;
        self.push(Obj::Vec2(Vec2::from(components).into()))
    }

    /// `Vec2` class construction from polar coordinates.
    pub fn vec2_polar(&mut self, args: &[Arg<'_>]) -> Result<ObjId, HostError> {
        let [r, theta] = self.opt_floats(args)?;
        self.push(Obj::Vec2(Vec2Slot::polar(r, theta)))
    }

    /// `Vec3` class construction with optional positional components.
    pub fn vec3_new(&mut self, args: &[Arg<'_>]) -> Result<ObjId, HostError> {
        let components: [f64; 3] = self.opt_floats(args)?;
        self.push(Obj::Vec3(Vec3::from(components).into()))
    }

    /// `Vec3` class construction from spherical coordinates.
    pub fn vec3_polar(&mut self, args: &[Arg<'_>]) -> Result<ObjId, HostError> {
        let [rho, phi, theta] = self.opt_floats(args)?;
        self.push(Obj::Vec3(Vec3Slot::polar(rho, phi, theta)))
    }

    /// Free-function constructor with required components.
    pub fn vec2(&mut self, x: f64, y: f64) -> Result<ObjId, HostError> {
        self.push(Obj::Vec2(Vec2Slot::new(x, y)))
    }

    /// Free-function constructor with required components.
    pub fn vec3(&mut self, x: f64, y: f64, z: f64) -> Result<ObjId, HostError> {
        self.push(Obj::Vec3(Vec3Slot::new(x, y, z)))
    }

    /// Copy-constructs a new object of the source's own class.
    pub fn clone_obj(&mut self, source: ObjId) -> Result<ObjId, HostError> {
        let id = if matches!(self.get(source)?, Obj::Vec2(_)) {
            self.alloc_vec2()?
        } else {
            self.alloc_vec3()?
        };
        self.send(id, "init_copy", &[Arg::Obj(source)])?;
        Ok(id)
    }

    /// Class name of an object, as dispatch sees it.
    pub fn class_of(&self, id: ObjId) -> Result<&'static str, HostError> {
        Ok(match self.get(id)? {
            Obj::Vec2(_) => "Vec2",
            Obj::Vec3(_) => "Vec3",
        })
    }

    /// Dispatches an instance method on an object by name.
    ///
    /// Copying operators allocate a fresh object for their result; bang
    /// operators hand back the receiver's own handle.
    pub fn send(&mut self, recv: ObjId, method: &str, args: &[Arg<'_>]) -> Result<Ret, HostError> {
        let produced = match self.get(recv)? {
            Obj::Vec2(slot) => self.send_vec2(slot, method, args)?,
            Obj::Vec3(slot) => self.send_vec3(slot, method, args)?,
        };
        Ok(match produced {
            Produced::Float(float) => Ret::Float(float),
            Produced::V2(v) => Ret::Obj(self.push(Obj::Vec2(Vec2Slot::new(v.x, v.y)))?),
            Produced::V3(v) => Ret::Obj(self.push(Obj::Vec3(Vec3Slot::new(v.x, v.y, v.z)))?),
            Produced::Receiver => Ret::Obj(recv),
            Produced::Text(text) => Ret::Str(text),
        })
    }

    fn send_vec2(
        &self,
        slot: &Vec2Slot,
        method: &str,
        args: &[Arg<'_>],
    ) -> Result<Produced, HostError> {
        Ok(match method {
            "init" => {
                let [x, y] = self.opt_floats(args)?;
                slot.init(x, y);
                Produced::Receiver
            }
            "init_copy" => {
                slot.init_copy(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "x" => {
                self.no_args(args)?;
                Produced::Float(slot.x()?)
            }
            "y" => {
                self.no_args(args)?;
                Produced::Float(slot.y()?)
            }
            "x=" => {
                let x = self.one_arg(args)?.expect_scalar()?;
                Produced::Float(slot.set_x(x)?)
            }
            "y=" => {
                let y = self.one_arg(args)?.expect_scalar()?;
                Produced::Float(slot.set_y(y)?)
            }
            "add" => Produced::V2(slot.add(&self.one_arg(args)?)?),
            "add!" => {
                slot.add_assign(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "sub" => Produced::V2(slot.sub(&self.one_arg(args)?)?),
            "sub!" => {
                slot.sub_assign(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "mul" => Produced::V2(slot.mul(&self.one_arg(args)?)?),
            "mul!" => {
                slot.mul_assign(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "div" => Produced::V2(slot.div(&self.one_arg(args)?)?),
            "div!" => {
                slot.div_assign(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "sq_mag" => {
                self.no_args(args)?;
                Produced::Float(slot.sq_mag()?)
            }
            "mag" => {
                self.no_args(args)?;
                Produced::Float(slot.mag()?)
            }
            "to_v2" => {
                self.no_args(args)?;
                Produced::Receiver
            }
            "to_v3" => {
                self.no_args(args)?;
                Produced::V3(slot.to_v3()?)
            }
            "to_s" => {
                self.no_args(args)?;
                Produced::Text(Self::text(slot.value()?)?)
            }
            _ => return Err(HostError::NoMethod { class: "Vec2" }),
        })
    }

    fn send_vec3(
        &self,
        slot: &Vec3Slot,
        method: &str,
        args: &[Arg<'_>],
    ) -> Result<Produced, HostError> {
        Ok(match method {
            "init" => {
                let [x, y, z] = self.opt_floats(args)?;
                slot.init(x, y, z);
                Produced::Receiver
            }
            "init_copy" => {
                slot.init_copy(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "x" => {
                self.no_args(args)?;
                Produced::Float(slot.x()?)
            }
            "y" => {
                self.no_args(args)?;
                Produced::Float(slot.y()?)
            }
            "z" => {
                self.no_args(args)?;
                Produced::Float(slot.z()?)
            }
            "x=" => {
                let x = self.one_arg(args)?.expect_scalar()?;
                Produced::Float(slot.set_x(x)?)
            }
            "y=" => {
                let y = self.one_arg(args)?.expect_scalar()?;
                Produced::Float(slot.set_y(y)?)
            }
            "z=" => {
                let z = self.one_arg(args)?.expect_scalar()?;
                Produced::Float(slot.set_z(z)?)
            }
            "add" => Produced::V3(slot.add(&self.one_arg(args)?)?),
            "add!" => {
                slot.add_assign(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "sub" => Produced::V3(slot.sub(&self.one_arg(args)?)?),
            "sub!" => {
                slot.sub_assign(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "mul" => Produced::V3(slot.mul(&self.one_arg(args)?)?),
            "mul!" => {
                slot.mul_assign(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "div" => Produced::V3(slot.div(&self.one_arg(args)?)?),
            "div!" => {
                slot.div_assign(&self.one_arg(args)?)?;
                Produced::Receiver
            }
            "sq_mag" => {
                self.no_args(args)?;
                Produced::Float(slot.sq_mag()?)
            }
            "mag" => {
                self.no_args(args)?;
                Produced::Float(slot.mag()?)
            }
            "to_v3" => {
                self.no_args(args)?;
                Produced::Receiver
            }
            "to_v2" => {
                self.no_args(args)?;
                Produced::V2(slot.to_v2()?)
            }
            "to_s" => {
                self.no_args(args)?;
                Produced::Text(Self::text(slot.value()?)?)
            }
            _ => return Err(HostError::NoMethod { class: "Vec3" }),
        })
    }

    fn text(value: impl core::fmt::Display) -> Result<String<128>, HostError> {
        let mut text = String::new();
        write!(text, "{}", value).map_err(|_| HostError::TextOverflow)?;
        Ok(text)
    }

    fn get(&self, id: ObjId) -> Result<&Obj, HostError> {
        self.objects.get(id.0).ok_or(HostError::BadHandle)
    }

    fn push(&mut self, obj: Obj) -> Result<ObjId, HostError> {
        let id = ObjId(self.objects.len());
        self.objects.push(obj).map_err(|_| HostError::Full)?;
        Ok(id)
    }

    fn value_of<'s>(&'s self, arg: &Arg<'s>) -> Result<Value<'s>, HostError> {
        Ok(match *arg {
            Arg::Nil => Value::Nil,
            Arg::Bool(b) => Value::Bool(b),
            Arg::Int(i) => Value::Int(i),
            Arg::Float(f) => Value::Float(f),
            Arg::Str(s) => Value::Str(s),
            Arg::Obj(id) => match self.get(id)? {
                Obj::Vec2(slot) => Value::Vec2(slot),
                Obj::Vec3(slot) => Value::Vec3(slot),
            },
        })
    }

    fn one_arg<'s>(&'s self, args: &[Arg<'s>]) -> Result<Value<'s>, HostError> {
        match args {
            [arg] => self.value_of(arg),
            _ => Err(HostError::Arity {
                expected: 1,
                got: args.len(),
            }),
        }
    }

    fn no_args(&self, args: &[Arg<'_>]) -> Result<(), HostError> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(HostError::Arity {
                expected: 0,
                got: args.len(),
            })
        }
    }

    fn opt_floats<const M: usize>(&self, args: &[Arg<'_>]) -> Result<[f64; M], HostError> {
        if args.len() > M {
            return Err(HostError::Arity {
                expected: M,
                got: args.len(),
            });
        }
        let mut floats = [0.0; M];
        for (target, arg) in floats.iter_mut().zip(args) {
            *target = self.value_of(arg)?.expect_scalar()?;
        }
        Ok(floats)
    }
}
