use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Result, VisualiserError};

/// Algorithm family; decides which surface is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sorting,
    Searching,
    Tree,
    Graph,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Sorting,
        Category::Searching,
        Category::Tree,
        Category::Graph,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sorting => "sorting",
            Category::Searching => "searching",
            Category::Tree => "tree",
            Category::Graph => "graph",
        }
    }

    /// Sorting and searching both operate on the bar dataset.
    pub fn uses_dataset(self) -> bool {
        matches!(self, Category::Sorting | Category::Searching)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = VisualiserError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VisualiserError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Linear,
    Binary,
    Preorder,
    Inorder,
    Postorder,
    LevelOrder,
    Bfs,
    Dfs,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 14] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Merge,
        AlgorithmId::Quick,
        AlgorithmId::Heap,
        AlgorithmId::Linear,
        AlgorithmId::Binary,
        AlgorithmId::Preorder,
        AlgorithmId::Inorder,
        AlgorithmId::Postorder,
        AlgorithmId::LevelOrder,
        AlgorithmId::Bfs,
        AlgorithmId::Dfs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Merge => "merge",
            AlgorithmId::Quick => "quick",
            AlgorithmId::Heap => "heap",
            AlgorithmId::Linear => "linear",
            AlgorithmId::Binary => "binary",
            AlgorithmId::Preorder => "preorder",
            AlgorithmId::Inorder => "inorder",
            AlgorithmId::Postorder => "postorder",
            AlgorithmId::LevelOrder => "levelorder",
            AlgorithmId::Bfs => "bfs",
            AlgorithmId::Dfs => "dfs",
        }
    }

    pub fn category(self) -> Category {
        match self {
            AlgorithmId::Bubble
            | AlgorithmId::Selection
            | AlgorithmId::Insertion
            | AlgorithmId::Merge
            | AlgorithmId::Quick
            | AlgorithmId::Heap => Category::Sorting,
            AlgorithmId::Linear | AlgorithmId::Binary => Category::Searching,
            AlgorithmId::Preorder
            | AlgorithmId::Inorder
            | AlgorithmId::Postorder
            | AlgorithmId::LevelOrder => Category::Tree,
            AlgorithmId::Bfs | AlgorithmId::Dfs => Category::Graph,
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = VisualiserError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace(['-', '_', ' '], "").to_ascii_lowercase();
        let bare = ["sort", "search"]
            .into_iter()
            .find_map(|suffix| wanted.strip_suffix(suffix).filter(|rest| !rest.is_empty()))
            .unwrap_or(&wanted);
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted || id.as_str() == bare)
            .ok_or_else(|| VisualiserError::UnknownAlgorithm(s.to_string()))
    }
}

/// Immutable metadata shown next to the visualisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmDescriptor {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub time: &'static str,
    pub space: &'static str,
    pub explanation: &'static str,
}

const fn descriptor(
    id: AlgorithmId,
    category: Category,
    name: &'static str,
    description: &'static str,
    time: &'static str,
    space: &'static str,
    explanation: &'static str,
) -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        id,
        name,
        category,
        description,
        time,
        space,
        explanation,
    }
}

static DESCRIPTORS: [AlgorithmDescriptor; 14] = [
    descriptor(
        AlgorithmId::Bubble,
        Category::Sorting,
        "Bubble Sort",
        "Bubble Sort repeatedly swaps adjacent elements if they are in wrong order.",
        "O(n^2)",
        "O(1)",
        "Repeatedly steps through the list, compares adjacent elements, and swaps them if they are in the wrong order. This process continues until the list is sorted.",
    ),
    descriptor(
        AlgorithmId::Selection,
        Category::Sorting,
        "Selection Sort",
        "Selection Sort repeatedly selects the minimum element and moves it to the beginning.",
        "O(n^2)",
        "O(1)",
        "Finds the minimum element from the unsorted part of the array and swaps it with the first unsorted element. Repeats this process, moving the boundary of the sorted array forward each time.",
    ),
    descriptor(
        AlgorithmId::Insertion,
        Category::Sorting,
        "Insertion Sort",
        "Insertion Sort builds the sorted array one element at a time.",
        "O(n^2)",
        "O(1)",
        "Takes elements one by one and inserts them into the correct position in the already sorted part of the array, shifting larger elements to the right.",
    ),
    descriptor(
        AlgorithmId::Merge,
        Category::Sorting,
        "Merge Sort",
        "Merge Sort divides the array into halves, sorts them, and merges back.",
        "O(n log n)",
        "O(n)",
        "Divides the array into two halves, recursively sorts each half, and then merges the sorted halves back together.",
    ),
    descriptor(
        AlgorithmId::Quick,
        Category::Sorting,
        "Quick Sort",
        "Quick Sort picks a pivot and partitions the array around it.",
        "O(n log n)",
        "O(log n)",
        "Selects a pivot element, partitions the array so that elements smaller than the pivot are on the left and larger are on the right, then recursively sorts the subarrays.",
    ),
    descriptor(
        AlgorithmId::Heap,
        Category::Sorting,
        "Heap Sort",
        "Heap Sort converts the array into a heap and repeatedly extracts the max/min.",
        "O(n log n)",
        "O(1)",
        "Builds a max-heap from the array, repeatedly swaps the first element with the last unsorted element, reduces the heap size, and heapifies the root to maintain the heap property.",
    ),
    descriptor(
        AlgorithmId::Linear,
        Category::Searching,
        "Linear Search",
        "Linear Search checks each element sequentially until target is found.",
        "O(n)",
        "O(1)",
        "Checks each element of the array one by one until the target element is found or the end of the array is reached.",
    ),
    descriptor(
        AlgorithmId::Binary,
        Category::Searching,
        "Binary Search",
        "Binary Search repeatedly divides sorted array to find the target.",
        "O(log n)",
        "O(1)",
        "Divides the sorted array in half repeatedly, comparing the target with the middle element to eliminate half of the search space each time.",
    ),
    descriptor(
        AlgorithmId::Preorder,
        Category::Tree,
        "Preorder",
        "Root-Left-Right traversal of a binary tree.",
        "O(n)",
        "O(h)",
        "Visits the root node first, then recursively traverses the left subtree, followed by the right subtree.",
    ),
    descriptor(
        AlgorithmId::Inorder,
        Category::Tree,
        "Inorder",
        "Left-Root-Right traversal of a binary tree.",
        "O(n)",
        "O(h)",
        "Recursively traverses the left subtree, visits the root node, then traverses the right subtree. Produces sorted order for BSTs.",
    ),
    descriptor(
        AlgorithmId::Postorder,
        Category::Tree,
        "Postorder",
        "Left-Right-Root traversal of a binary tree.",
        "O(n)",
        "O(h)",
        "Recursively traverses the left subtree, then the right subtree, and finally visits the root node.",
    ),
    descriptor(
        AlgorithmId::LevelOrder,
        Category::Tree,
        "Level Order",
        "Traverses tree level by level from top to bottom.",
        "O(n)",
        "O(n)",
        "Uses a queue to traverse the tree level by level, visiting all nodes of each level before moving to the next.",
    ),
    descriptor(
        AlgorithmId::Bfs,
        Category::Graph,
        "BFS",
        "Breadth First Search visits nodes level by level.",
        "O(V+E)",
        "O(V)",
        "Starts from a source node and explores all its neighbors first before moving to the next level neighbors, typically implemented using a queue.",
    ),
    descriptor(
        AlgorithmId::Dfs,
        Category::Graph,
        "DFS",
        "Depth First Search visits nodes using recursion/stack.",
        "O(V+E)",
        "O(V)",
        "Starts from a source node and explores as far as possible along each branch before backtracking, typically implemented using recursion or a stack.",
    ),
];

/// Registry of every algorithm the visualiser can run.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    descriptors: &'static [AlgorithmDescriptor],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            descriptors: &DESCRIPTORS,
        }
    }

    pub fn get(&self, id: AlgorithmId) -> &'static AlgorithmDescriptor {
        // DESCRIPTORS is laid out in `AlgorithmId::ALL` order.
        &self.descriptors[id as usize]
    }

    pub fn lookup(&self, name: &str) -> Result<&'static AlgorithmDescriptor> {
        name.parse::<AlgorithmId>().map(|id| self.get(id))
    }

    /// Descriptors of one category in display order.
    pub fn in_category(&self, category: Category) -> Vec<&'static AlgorithmDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_follow_id_order() {
        let catalog = Catalog::new();
        for id in AlgorithmId::ALL {
            let descriptor = catalog.get(id);
            assert_eq!(descriptor.id, id);
            assert_eq!(descriptor.category, id.category());
        }
    }

    #[test]
    fn parses_ids_leniently() {
        assert_eq!("Level-Order".parse::<AlgorithmId>().unwrap(), AlgorithmId::LevelOrder);
        assert_eq!(" BFS ".parse::<AlgorithmId>().unwrap(), AlgorithmId::Bfs);
        assert_eq!("bubble-sort".parse::<AlgorithmId>().unwrap(), AlgorithmId::Bubble);
        assert_eq!("Binary Search".parse::<AlgorithmId>().unwrap(), AlgorithmId::Binary);
        assert!(matches!(
            "bogo".parse::<AlgorithmId>(),
            Err(VisualiserError::UnknownAlgorithm(name)) if name == "bogo"
        ));
        assert_eq!("Graph".parse::<Category>().unwrap(), Category::Graph);
    }

    #[test]
    fn lists_categories_in_display_order() {
        let catalog = Catalog::new();
        let names: Vec<_> = catalog
            .in_category(Category::Searching)
            .iter()
            .map(|descriptor| descriptor.name)
            .collect();
        assert_eq!(names, vec!["Linear Search", "Binary Search"]);
        assert_eq!(catalog.in_category(Category::Sorting).len(), 6);
        assert_eq!(catalog.lookup("heap").unwrap().time, "O(n log n)");
    }
}
