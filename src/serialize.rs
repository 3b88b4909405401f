use rulinalg::matrix::Matrix;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Store floats as their bit patterns, so a saved network reloads exactly
pub fn serialize_floats<S: Serializer>(floats: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    floats
        .iter()
        .map(|&f| f64::to_bits(f))
        .collect::<Vec<u64>>()
        .serialize(serializer)
}

pub fn deserialize_floats<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    Ok(Vec::<u64>::deserialize(deserializer)?
        .into_iter()
        .map(f64::from_bits)
        .collect())
}

/// Store a weight matrix as the bit patterns of its values
pub fn serialize_matrix<S: Serializer>(
    matrix: &Matrix<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let bits: Vec<u64> = matrix.data().iter().map(|&f| f64::to_bits(f)).collect();

    bits.serialize(serializer)
}

/// Inverse of [serialize_matrix] for square matrices. A length that isn't a perfect square is a
/// deserialization error.
pub fn deserialize_matrix_square<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Matrix<f64>, D::Error> {
    let float_data = deserialize_floats(deserializer)?;

    let n = (float_data.len() as f64).sqrt() as usize;
    if n * n != float_data.len() {
        return Err(serde::de::Error::custom(format!(
            "non-square weight vec of length {}",
            float_data.len()
        )));
    }
    Ok(Matrix::new(n, n, float_data))
}
