// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use convscope_structures::{
    Field, Grid2D, GridShape, PlanarCoord, Tensor3D, TensorShape, VolumetricCoord, ZeroPad,
};

fn fill_with_ones<F: Field>(shape: F::Shape) -> F {
    F::from_fn(shape, |_| 1.0)
}

#[test]
fn test_field_is_generic_over_grids_and_tensors() {
    let grid: Grid2D = fill_with_ones(GridShape::new(2, 3).unwrap());
    assert_eq!(grid.get(PlanarCoord::new(1, 2)), Some(1.0));

    let tensor: Tensor3D = fill_with_ones(TensorShape::new(2, 2, 2).unwrap());
    assert_eq!(tensor.get(VolumetricCoord::new(1, 1, 1)), Some(1.0));
}

#[test]
fn test_padding_then_editing_leaves_source_untouched() {
    let tensor = Tensor3D::from_nested(&[vec![vec![1.0, 2.0], vec![3.0, 4.0]]]).unwrap();
    let mut padded = tensor.zero_padded(1).unwrap();
    assert_eq!(padded.shape(), TensorShape::new(1, 4, 4).unwrap());

    padded.set(VolumetricCoord::new(0, 1, 1), 100.0).unwrap();
    assert_eq!(tensor.get(VolumetricCoord::new(0, 0, 0)), Some(1.0));
    assert_eq!(padded.get(VolumetricCoord::new(0, 2, 2)), Some(4.0));
}

#[test]
fn test_tensor_json_shape_is_checked() {
    let tensor = Tensor3D::zeros(TensorShape::new(1, 1, 2).unwrap());
    let json = serde_json::to_string(&tensor).unwrap();
    let back: Tensor3D = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tensor);
}
