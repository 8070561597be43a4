/// Selection sort: moves the minimum of the unsorted tail to its front.
pub fn selection_sort<T: Ord>(v: &mut [T]) {
    let n = v.len();
    for i in 0..n.saturating_sub(1) {
        let mut min_index = i;
        for j in i + 1..n {
            if v[j] < v[min_index] {
                min_index = j;
            }
        }
        if min_index != i {
            v.swap(i, min_index);
        }
    }
}

/// Insertion sort: shifts the larger elements right until the key fits.
pub fn insertion_sort<T: Ord>(v: &mut [T]) {
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && v[j - 1] > v[j] {
            v.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Quicksort with Hoare partitioning around the middle element.
pub fn quick_sort<T: Ord + Clone>(v: &mut [T]) {
    if v.len() < 2 {
        return;
    }
    let pivot = v[v.len() / 2].clone();
    // j may step below zero when the pivot ends up first
    let mut i: isize = 0;
    let mut j: isize = v.len() as isize - 1;
    loop {
        while v[i as usize] < pivot {
            i += 1;
        }
        while v[j as usize] > pivot {
            j -= 1;
        }
        if i <= j {
            v.swap(i as usize, j as usize);
            i += 1;
            j -= 1;
        }
        if i > j {
            break;
        }
    }
    if j > 0 {
        quick_sort(&mut v[..=j as usize]);
    }
    if (i as usize) < v.len() {
        quick_sort(&mut v[i as usize..]);
    }
}

/// The library sort the hand written ones are compared against.
pub fn std_sort<T: Ord>(v: &mut [T]) {
    v.sort_unstable();
}
