use super::*;

#[test]
fn view_borrows_without_copy() {
    let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let v = ImageView::new(&bytes, 1, 2, 4).unwrap();
    assert_eq!(v.data().as_ptr(), bytes.as_ptr());
    assert_eq!(v.sample(0, 1, 3), 8);
}

#[test]
fn view_rejects_mismatched_length() {
    let bytes = [0u8; 7];
    assert!(ImageView::new(&bytes, 1, 2, 4).is_err());
}

#[test]
fn to_image_copies_shape_and_bytes() {
    let bytes = [9u8; 12];
    let img = ImageView::new(&bytes, 2, 2, 3).unwrap().to_image().unwrap();
    assert_eq!((img.height(), img.width(), img.channels()), (2, 2, 3));
    assert_eq!(img.data(), &bytes);
}

#[test]
fn view_mut_writes_through() {
    let mut bytes = [0u8; 8];
    {
        let mut v = ImageViewMut::new(&mut bytes, 2, 1, 4).unwrap();
        v.data_mut()[5] = 42;
        assert_eq!(v.as_view().sample(1, 0, 1), 42);
    }
    assert_eq!(bytes[5], 42);
}

#[test]
fn same_dims_ignores_channels() {
    let a = [0u8; 12];
    let b = [0u8; 16];
    let va = ImageView::new(&a, 2, 2, 3).unwrap();
    let vb = ImageView::new(&b, 2, 2, 4).unwrap();
    assert!(va.same_dims(&vb));
}
