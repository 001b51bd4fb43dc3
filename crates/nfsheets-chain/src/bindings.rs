//! `sol!`-generated view and transaction bindings for the deployed
//! NFSheets ERC-721 contract.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface INFSheets {
        function totalSupply() external view returns (uint256);
        function getValuesRange(uint256 fromId, uint256 toId)
            external view returns (uint256[] memory tokenIds, string[] memory values);
        function ownerOf(uint256 tokenId) external view returns (address);
        function getValue(uint256 tokenId) external view returns (string memory);
        function getPrice() external view returns (uint256);

        function mint(uint256 column, uint256 row, string calldata value) external payable;
        function setValue(uint256 tokenId, string calldata value) external;
    }
}
