//! Ordered course index backed by an unbalanced binary search tree.
//!
//! Courses are keyed by [`Course::course_number`] using plain `str` ordering
//! (byte-wise, so `"CS200" < "CS30" < "cs100"`). The tree is built once and
//! then only read:
//!
//! - **Insert-if-absent**: the first course stored under a key wins; later
//!   inserts with the same key are no-ops.
//! - **Exact lookup**: case-sensitive match on the course number.
//! - **Ascending enumeration**: a lazy in-order walk that borrows the index,
//!   so it can be restarted any number of times.
//!
//! There is no rebalancing. The shape depends only on insertion order, so a
//! file sorted by course number produces a list-shaped tree and O(n) lookups.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::types::Course;

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    course: Course,
    left: Link,
    right: Link,
}

impl Node {
    fn new(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree of courses keyed by course number.
#[derive(Debug, Default)]
pub struct CourseIndex {
    root: Link,
    len: usize,
}

impl CourseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored courses.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a course under its course number.
    ///
    /// Returns `true` if the course was stored, `false` if a course with the
    /// same number already exists. In the latter case the existing entry is
    /// left untouched and `course` is dropped.
    pub fn insert(&mut self, course: Course) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match course
                .course_number
                .as_str()
                .cmp(node.course.course_number.as_str())
            {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *link = Some(Box::new(Node::new(course)));
        self.len += 1;
        true
    }

    /// Find the course stored under exactly `course_number`.
    pub fn lookup(&self, course_number: &str) -> Option<&Course> {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match course_number.cmp(node.course.course_number.as_str()) {
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
                Ordering::Equal => return Some(&node.course),
            };
        }
        None
    }

    pub fn contains(&self, course_number: &str) -> bool {
        self.lookup(course_number).is_some()
    }

    /// Courses in ascending course-number order, or `None` if the index is empty.
    pub fn ascending(&self) -> Option<Iter<'_>> {
        if self.is_empty() {
            None
        } else {
            Some(self.iter())
        }
    }

    /// In-order iterator over all courses. Yields nothing for an empty index.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root, self.len)
    }

    /// Number of nodes on the longest root-to-leaf path.
    ///
    /// `0` for an empty index. Equal to [`len`](Self::len) when the input was
    /// already sorted.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = &self.root {
            pending.push((&**root, 1));
        }
        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            for child in [&node.left, &node.right].into_iter().flatten() {
                pending.push((&**child, depth + 1));
            }
        }
        height
    }
}

// Boxed children would otherwise be dropped recursively, which overflows the
// stack on a list-shaped tree built from a large sorted file.
impl Drop for CourseIndex {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl Extend<Course> for CourseIndex {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for CourseIndex {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut index = CourseIndex::new();
        index.extend(iter);
        index
    }
}

impl<'a> IntoIterator for &'a CourseIndex {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order traversal of a [`CourseIndex`].
///
/// Keeps an explicit stack of the left spine still to visit, so traversal
/// depth is bounded by heap memory rather than the call stack.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some(&node.course)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
