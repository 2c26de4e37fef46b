//! Register definitions for the SX1276 LoRa modem
//! Addresses follow the SX1276/77/78/79 datasheet register map
//!
//! Every register used by the core shares its byte with fields owned by
//! other concerns, so all field updates go through the read-modify-write
//! helpers in this module rather than raw writes.

mod modem;

pub use modem::*;

use core::convert::Infallible;

use regiface::{ReadableRegister, WritableRegister};

use crate::device::RadioDevice;

/// Reads a typed register value from the device.
///
/// Performs exactly one bus transaction.
pub fn read_register<D, R>(device: &mut D) -> R
where
    D: RadioDevice + ?Sized,
    R: ReadableRegister<IdType = u8, Array = [u8; 1], Error = Infallible>,
{
    let raw = device.read_register(R::id());
    R::from_bytes([raw]).unwrap()
}

/// Writes a typed register value to the device.
///
/// Performs exactly one bus transaction.
pub fn write_register<D, R>(device: &mut D, register: R)
where
    D: RadioDevice + ?Sized,
    R: WritableRegister<IdType = u8, Array = [u8; 1], Error = Infallible>,
{
    let [raw] = register.to_bytes().unwrap();
    device.write_register(R::id(), raw);
}

/// Reads a register, applies `f`, and writes the result back.
///
/// This is the only safe way to update a field that shares its byte with
/// fields owned by other concerns: the sibling bits pass through `f`
/// untouched and are written back exactly as read.
pub fn modify_register<D, R, F>(device: &mut D, f: F)
where
    D: RadioDevice + ?Sized,
    R: ReadableRegister<IdType = u8, Array = [u8; 1], Error = Infallible>
        + WritableRegister<IdType = u8, Array = [u8; 1], Error = Infallible>,
    F: FnOnce(R) -> R,
{
    let value = read_register::<D, R>(device);
    write_register(device, f(value));
}

/// Like [`modify_register`], but skips the write-back when `f` leaves the
/// value unchanged. Used for idempotent flag sets to avoid redundant bus
/// writes.
pub fn modify_register_if_changed<D, R, F>(device: &mut D, f: F)
where
    D: RadioDevice + ?Sized,
    R: ReadableRegister<IdType = u8, Array = [u8; 1], Error = Infallible>
        + WritableRegister<IdType = u8, Array = [u8; 1], Error = Infallible>
        + Copy
        + PartialEq,
    F: FnOnce(R) -> R,
{
    let current = read_register::<D, R>(device);
    let updated = f(current);
    if updated != current {
        write_register(device, updated);
    }
}
