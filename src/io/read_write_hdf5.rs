//! `Hdf5` functions to read and write ndarrays
use super::H5Type;
use super::Result;
use ndarray::{Array, Array1, ArrayBase, ArrayD, Data, Dimension};
use std::path::Path;

/// Read scalar from hdf5
///
/// # Errors
/// When file or variable does not exist, or the variable
/// is not a one dimensional dataset.
pub fn read_scalar_from_hdf5<T>(filename: &str, name: &str) -> Result<T>
where
    T: H5Type + Copy,
{
    let file = hdf5::File::open(filename)?;
    let dset = file.dataset(name)?;
    if dset.shape().len() != 1 {
        return Err(hdf5::Error::Internal(format!(
            "{} must be of dimension 1, but is of dimension {}",
            name,
            dset.shape().len()
        )));
    }
    let scalar: Array1<T> = dset.read()?;
    Ok(scalar[0])
}

/// Write scalar to hdf5 file
///
/// # Errors
/// When file can not be opened or created.
pub fn write_scalar_to_hdf5<T>(filename: &str, name: &str, scalar: T) -> Result<()>
where
    T: H5Type + Copy,
{
    let x = Array1::<T>::from_elem(1, scalar);
    write_to_hdf5(filename, name, &x)
}

/// Read ndarray from hdf5 file
///
/// # Errors
/// When file or variable does not exist, or the
/// dimensionality of the dataset differs from `D`.
pub fn read_from_hdf5<A, D>(filename: &str, varname: &str) -> Result<Array<A, D>>
where
    A: H5Type,
    D: Dimension,
{
    let file = hdf5::File::open(filename)?;
    let data = file.dataset(varname)?;
    let y: ArrayD<A> = data.read_dyn::<A>()?;
    y.into_dimensionality::<D>()
        .map_err(|e| hdf5::Error::Internal(format!("{}: {}", varname, e)))
}

/// Write ndarray to hdf5 file
///
/// Appends to an existing file, an existing variable
/// is overwritten.
///
/// # Errors
/// When file can not be opened or created, or an existing
/// variable has a different shape than `array`.
pub fn write_to_hdf5<A, S, D>(filename: &str, varname: &str, array: &ArrayBase<S, D>) -> Result<()>
where
    A: H5Type,
    S: Data<Elem = A>,
    D: Dimension,
{
    let file = if Path::new(filename).exists() {
        hdf5::File::append(filename)?
    } else {
        hdf5::File::create(filename)?
    };
    let dset = match file.dataset(varname) {
        Ok(dset) => dset,
        Err(..) => file
            .new_dataset::<A>()
            .no_chunk()
            .shape(array.shape())
            .create(varname)?,
    };
    dset.write(&array.view())?;
    Ok(())
}
